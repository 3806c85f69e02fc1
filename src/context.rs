//! Request identity carried explicitly into every core operation.
//!
//! The transport layer authenticates the caller and hands the resolved
//! [`UserInfo`] to each `VoteCore` method as a plain argument. The core never
//! authenticates and never stashes identity in task-local or global state.

use crate::storage::traits::UserId;
use serde::{Deserialize, Serialize};

/// Authenticated caller identity for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    pub address: Address,
}

/// Residence attributes of the caller. The apartment code is the scope an
/// agenda is authorized against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub apartment_code: String,
}

impl UserInfo {
    pub fn new(id: UserId, apartment_code: impl Into<String>) -> Self {
        Self {
            id,
            address: Address {
                apartment_code: apartment_code.into(),
            },
        }
    }
}
