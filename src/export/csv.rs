//! CSV export of alumni lists
//!
//! Every field is wrapped in double quotes and embedded quotes are doubled;
//! rows are separated by `\n`. The header is fixed and rows keep the order
//! of the list they were built from.

use crate::models::Alumnus;
use crate::utils::errors::{RegistryError, Result};

/// File name of the alumni export
pub const ALUMNI_CSV_FILE: &str = "alumni.csv";

/// Column headers of the alumni export
pub const ALUMNI_CSV_HEADER: [&str; 6] = [
    "Full Name",
    "Graduation Year",
    "Baccalaureate",
    "Path",
    "Email",
    "Phone",
];

/// Quote a single field
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// The six export columns of one alumnus
pub fn alumnus_fields(alumnus: &Alumnus) -> [String; 6] {
    [
        alumnus.full_name.clone(),
        alumnus.graduation_year.to_string(),
        if alumnus.bacalaureat_passed { "Yes" } else { "No" }.to_string(),
        alumnus.path.as_str().to_string(),
        alumnus.email.clone().unwrap_or_default(),
        alumnus.phone.clone().unwrap_or_default(),
    ]
}

fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize alumni, header first
pub fn alumni_to_csv<'a, I>(alumni: I) -> String
where
    I: IntoIterator<Item = &'a Alumnus>,
{
    let mut rows = vec![join_row(&ALUMNI_CSV_HEADER)];
    rows.extend(alumni.into_iter().map(|a| join_row(&alumnus_fields(a))));
    rows.join("\n")
}

/// Split CSV text produced with the quoting rule above back into fields
///
/// Unquoted fields are accepted too. A trailing newline does not produce an
/// extra empty row.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut closed = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                    closed = true;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !closed => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut field));
                closed = false;
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                closed = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            _ if closed => {
                return Err(RegistryError::InvalidInput(format!(
                    "Unexpected character {:?} after closing quote in row {}",
                    c,
                    rows.len() + 1
                )));
            }
            '"' => {
                return Err(RegistryError::InvalidInput(format!(
                    "Stray quote in unquoted field in row {}",
                    rows.len() + 1
                )));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(RegistryError::InvalidInput("Unterminated quoted field".to_string()));
    }

    if !text.is_empty() && !text.ends_with('\n') {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
