//! The demo identity.

use serde::{Deserialize, Serialize};

pub const DEMO_USER_ID: &str = "u_demo";
pub const DEMO_USER_NAME: &str = "Demo User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn demo() -> Self {
        User {
            id: DEMO_USER_ID.to_string(),
            name: DEMO_USER_NAME.to_string(),
        }
    }
}
