//! Alumnus model

use std::fmt;
use std::str::FromStr;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use crate::utils::errors::RegistryError;

/// A graduate record as returned by the registry API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alumnus {
    pub id: String,
    pub full_name: String,
    pub graduation_year: i32,
    pub bacalaureat_passed: bool,
    pub path: GraduatePath,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Post-graduation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraduatePath {
    #[default]
    Faculty,
    Employed,
    #[serde(other)]
    Other,
}

impl GraduatePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraduatePath::Faculty => "faculty",
            GraduatePath::Employed => "employed",
            GraduatePath::Other => "other",
        }
    }

    /// Translation key of the localized label
    pub fn label_key(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for GraduatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraduatePath {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faculty" => Ok(GraduatePath::Faculty),
            "employed" => Ok(GraduatePath::Employed),
            "other" => Ok(GraduatePath::Other),
            other => Err(RegistryError::InvalidInput(format!(
                "Unknown path '{}', expected faculty, employed or other",
                other
            ))),
        }
    }
}

/// Body of `POST /api/alumni` and `PUT /api/alumni/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumnusForm {
    pub full_name: String,
    pub graduation_year: i32,
    pub bacalaureat_passed: bool,
    pub path: GraduatePath,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Default for AlumnusForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            graduation_year: chrono::Local::now().year(),
            bacalaureat_passed: true,
            path: GraduatePath::Faculty,
            email: None,
            phone: None,
        }
    }
}

impl AlumnusForm {
    /// Blank optional fields become `None`
    pub fn normalized(mut self) -> Self {
        self.full_name = self.full_name.trim().to_string();
        self.email = normalize_optional(self.email);
        self.phone = normalize_optional(self.phone);
        self
    }

    /// Clear the per-record fields, keeping year, baccalaureate and path
    pub fn reset_after_save(&mut self) {
        self.full_name.clear();
        self.email = None;
        self.phone = None;
    }
}

impl From<&Alumnus> for AlumnusForm {
    fn from(alumnus: &Alumnus) -> Self {
        Self {
            full_name: alumnus.full_name.clone(),
            graduation_year: alumnus.graduation_year,
            bacalaureat_passed: alumnus.bacalaureat_passed,
            path: alumnus.path,
            email: alumnus.email.clone(),
            phone: alumnus.phone.clone(),
        }
    }
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
