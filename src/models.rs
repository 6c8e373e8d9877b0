//! Sample record types loaded by the command-line tool.

use crate::record::{Record, RecordDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bank account row: `id,name,balance`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: i32,
}

impl Record for Account {
    fn descriptor() -> RecordDescriptor<Self> {
        RecordDescriptor::new(Account::default)
            .int64("id", |account, value| {
                account.id = value;
                Ok(())
            })
            .text("name", |account, value| {
                account.name = value;
                Ok(())
            })
            .int32("balance", |account, value| {
                account.balance = value;
                Ok(())
            })
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account{{id={}, name='{}', balance={}}}",
            self.id, self.name, self.balance
        )
    }
}
