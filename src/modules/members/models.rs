use bookfinder_store::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// First day of the membership
    pub start_date: Option<NaiveDate>,
    /// Last day of the membership
    pub end_date: Option<NaiveDate>,
}

impl Entity for Member {
    const KIND: &'static str = "member";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Request body for creating or replacing a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberInput {
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MemberInput {
    pub fn into_member(self, id: u64) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
