//! Authorization gate and open/closed classification.
//!
//! Both helpers are pure. Closed-ness has no explicit transition event: it is
//! a fresh calendar comparison at every decision point, so callers must not
//! cache the answer across calls or ticks.

use crate::context::UserInfo;
use crate::storage::traits::Agenda;
use crate::vote::error::{VoteError, VoteResult};
use chrono::NaiveDate;

/// A caller may act on an agenda iff their apartment code matches the
/// agenda's scope.
pub fn authorize(agenda: &Agenda, user: &UserInfo) -> VoteResult<()> {
    if agenda.apartment_code == user.address.apartment_code {
        Ok(())
    } else {
        Err(VoteError::NotAuthorized)
    }
}

/// Whether voting has ended as of `today`. The end date itself still counts
/// as open; only a strictly later day closes the agenda.
pub fn voting_closed(agenda: &Agenda, today: NaiveDate) -> bool {
    today > agenda.end_date
}

/// Today's date in the local zone, the clock every production decision uses.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::AgendaId;

    fn agenda(apartment_code: &str, end_date: NaiveDate) -> Agenda {
        Agenda {
            id: AgendaId(1),
            apartment_code: apartment_code.to_string(),
            end_date,
            secret: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn matching_apartment_code_is_authorized() {
        let agenda = agenda("A-101", date(2026, 8, 30));
        let user = UserInfo::new(crate::storage::traits::UserId(1), "A-101");
        assert!(authorize(&agenda, &user).is_ok());
    }

    #[test]
    fn mismatched_apartment_code_is_rejected() {
        let agenda = agenda("A-101", date(2026, 8, 30));
        let user = UserInfo::new(crate::storage::traits::UserId(1), "B-202");
        assert!(matches!(
            authorize(&agenda, &user),
            Err(VoteError::NotAuthorized)
        ));
    }

    #[test]
    fn end_date_day_is_still_open() {
        let agenda = agenda("A-101", date(2026, 8, 23));
        assert!(!voting_closed(&agenda, date(2026, 8, 23)));
        assert!(!voting_closed(&agenda, date(2026, 8, 22)));
        assert!(voting_closed(&agenda, date(2026, 8, 24)));
    }
}
