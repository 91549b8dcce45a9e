#![allow(dead_code)]

use serde::Serialize;
use tabular_encoder::Records;

#[derive(Serialize, Clone)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

#[derive(Serialize, Clone)]
pub struct Row {
    pub name: String,
    pub age: u32,
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
}

pub fn john() -> Row {
    Row {
        name: "John".to_string(),
        age: 30,
        contact: Contact {
            email: "test@test.com".to_string(),
            phone: "1234567890".to_string(),
        },
        hobbies: None,
    }
}

/// Two identical rows, none of them with hobbies.
pub fn rows() -> Records {
    Records::from_serializable(&vec![john(), john()]).unwrap()
}

pub const CONTACT: &str = r#"{"email":"test@test.com","phone":"1234567890"}"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
