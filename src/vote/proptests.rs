//! Property-based tests for the pure gate helpers.

use crate::context::UserInfo;
use crate::storage::traits::{Agenda, AgendaId, UserId};
use crate::vote::error::VoteError;
use crate::vote::gate::{authorize, voting_closed};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // Any day in a few-decade window around the epoch of interest.
    (0i64..20_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(days)
    })
}

fn apartment_code() -> impl Strategy<Value = String> {
    "[A-D]-[0-9]{3}"
}

proptest! {
    #[test]
    fn authorization_follows_apartment_code_equality(
        agenda_code in apartment_code(),
        user_code in apartment_code(),
        end_date in any_date(),
    ) {
        let agenda = Agenda {
            id: AgendaId(1),
            apartment_code: agenda_code.clone(),
            end_date,
            secret: false,
        };
        let user = UserInfo::new(UserId(1), user_code.clone());

        match authorize(&agenda, &user) {
            Ok(()) => prop_assert_eq!(agenda_code, user_code),
            Err(VoteError::NotAuthorized) => prop_assert_ne!(agenda_code, user_code),
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    #[test]
    fn closed_iff_strictly_past_end_date(end_date in any_date(), today in any_date()) {
        let agenda = Agenda {
            id: AgendaId(1),
            apartment_code: "A-101".to_string(),
            end_date,
            secret: false,
        };
        prop_assert_eq!(voting_closed(&agenda, today), today > end_date);
    }

    #[test]
    fn classification_is_stable_for_a_fixed_day(end_date in any_date(), today in any_date()) {
        let agenda = Agenda {
            id: AgendaId(1),
            apartment_code: "A-101".to_string(),
            end_date,
            secret: true,
        };
        // Re-evaluation with the same inputs never flips the answer.
        prop_assert_eq!(voting_closed(&agenda, today), voting_closed(&agenda, today));
    }
}
