use crate::error::{Result, TillError};
use serde::Serialize;
use std::fmt;

pub const ADMIN_IDS: [&str; 2] = ["A001", "B001"];
pub const ADMIN_PASSWORD: &str = "@Dmin";
pub const S_SERIES_PASSWORD: &str = "g>nZ";
pub const T_SERIES_PASSWORD: &str = "Gen*";

const MAX_AGE: i32 = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NotEligible,
    /// The T-series ID matched but its birth year gives an impossible age.
    UnverifiableAge,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "access")]
pub enum Access {
    Administrator,
    OldCitizen,
    Citizen { age: i32 },
    Denied { reason: DenialReason },
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Administrator => f.write_str("Welcome administrator"),
            Access::OldCitizen => f.write_str("Welcome old Singaporean friend"),
            Access::Citizen { age } => {
                let unit = if *age == 1 { "year" } else { "years" };
                write!(
                    f,
                    "Welcome back, my Singaporean friend at your {} {} old",
                    age, unit
                )
            }
            Access::Denied { .. } => f.write_str("Sorry, this site is only open to Singaporeans"),
        }
    }
}

/// Classifies a user ID and password pair.
///
/// The ID is trimmed and upper-cased before matching; the password is compared as given.
pub fn classify(user_id: &str, password: &str, current_year: i32) -> Result<Access> {
    let user_id = user_id.trim().to_uppercase();
    if user_id.is_empty() || password.is_empty() {
        return Err(TillError::MissingCredentials);
    }

    let access = if ADMIN_IDS.contains(&user_id.as_str()) && password == ADMIN_PASSWORD {
        Access::Administrator
    } else if is_national_id(&user_id, 'S') && password == S_SERIES_PASSWORD {
        Access::OldCitizen
    } else if is_national_id(&user_id, 'T') && password == T_SERIES_PASSWORD {
        match age_from_id(&user_id, current_year) {
            Some(age) => Access::Citizen { age },
            None => Access::Denied {
                reason: DenialReason::UnverifiableAge,
            },
        }
    } else {
        Access::Denied {
            reason: DenialReason::NotEligible,
        }
    };

    Ok(access)
}

/// `prefix`, seven ASCII digits, one uppercase ASCII letter.
fn is_national_id(id: &str, prefix: char) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 9
        && bytes[0] == prefix as u8
        && bytes[1..8].iter().all(u8::is_ascii_digit)
        && bytes[8].is_ascii_uppercase()
}

/// T-series IDs carry the last two digits of a post-2000 birth year.
fn age_from_id(id: &str, current_year: i32) -> Option<i32> {
    let yy: i32 = id.get(1..3)?.parse().ok()?;
    let age = current_year - (2000 + yy);
    (0..=MAX_AGE).contains(&age).then_some(age)
}
