//! Alumni panel
//!
//! Form, listing, search/filter and CSV export for alumni records. The list
//! is whatever the API returned on the last successful load; filtering is
//! purely client-side.

use std::collections::BTreeSet;
use std::path::PathBuf;
use regex::Regex;
use tracing::{debug, info};
use crate::config::FeaturesConfig;
use crate::export::csv::{alumni_to_csv, ALUMNI_CSV_FILE};
use crate::i18n::Localizer;
use crate::models::{Alumnus, AlumnusForm};
use crate::services::{ApiClient, Downloads};
use crate::state::{SessionStore, TaskScope};
use crate::utils::errors::{RegistryError, Result};
use crate::utils::logging::log_admin_action;
use super::{render_table, section_title};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Keep the records matching `query` and `year`, in their original order
///
/// An empty query matches everything, otherwise it must be a
/// case-insensitive substring of the full name or the email. An empty year
/// matches everything, otherwise it is compared to the graduation year as a
/// string.
pub fn filter_alumni<'a>(records: &'a [Alumnus], query: &str, year: &str) -> Vec<&'a Alumnus> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|a| {
            let query_ok = needle.is_empty()
                || a.full_name.to_lowercase().contains(&needle)
                || a.email.as_deref().unwrap_or_default().to_lowercase().contains(&needle);
            let year_ok = year.is_empty() || a.graduation_year.to_string() == year;
            query_ok && year_ok
        })
        .collect()
}

/// Distinct graduation years, ascending
pub fn year_options(records: &[Alumnus]) -> Vec<i32> {
    records
        .iter()
        .map(|a| a.graduation_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Alumni panel state
#[derive(Debug)]
pub struct AlumniPanel {
    api: ApiClient,
    features: FeaturesConfig,
    scope: TaskScope,
    email_pattern: Regex,
    pub form: AlumnusForm,
    list: Vec<Alumnus>,
    query: String,
    year_filter: String,
}

impl AlumniPanel {
    pub fn new(api: ApiClient, features: FeaturesConfig) -> Result<Self> {
        let email_pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| RegistryError::Config(format!("Invalid email pattern: {}", e)))?;

        Ok(Self {
            api,
            features,
            scope: TaskScope::new("alumni"),
            email_pattern,
            form: AlumnusForm::default(),
            list: Vec::new(),
            query: String::new(),
            year_filter: String::new(),
        })
    }

    /// Fetch the full list
    pub async fn load(&mut self) -> Result<()> {
        let api = self.api.clone();
        let task = self.scope.spawn(async move { api.list_alumni().await });

        match task.join().await {
            Some(Ok(list)) => {
                debug!(count = list.len(), "Alumni loaded");
                self.list = list;
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => Ok(()),
        }
    }

    /// Submit the form, then reset its per-record fields and reload
    pub async fn create(&mut self, session: &SessionStore) -> Result<Alumnus> {
        let token = session.require_token()?.to_string();
        let form = self.validated(self.form.clone())?;

        let api = self.api.clone();
        let task = self
            .scope
            .spawn(async move { api.create_alumnus(&token, &form).await });
        let created = task
            .join()
            .await
            .ok_or_else(|| RegistryError::InvalidInput("Alumni panel was closed".to_string()))??;

        log_admin_action(session.username(), "create_alumnus", Some(&created.id));
        self.form.reset_after_save();
        self.load().await?;
        Ok(created)
    }

    /// Replace an existing record
    pub async fn update(&mut self, session: &SessionStore, id: &str, form: AlumnusForm) -> Result<Alumnus> {
        let token = session.require_token()?;
        let form = self.validated(form)?;

        let updated = self.api.update_alumnus(token, id, &form).await?;
        log_admin_action(session.username(), "update_alumnus", Some(id));
        self.load().await?;
        Ok(updated)
    }

    /// Delete a record
    pub async fn delete(&mut self, session: &SessionStore, id: &str) -> Result<()> {
        let token = session.require_token()?;
        self.api.delete_alumnus(token, id).await?;
        log_admin_action(session.username(), "delete_alumnus", Some(id));
        self.load().await
    }

    /// Fetch a single record
    pub async fn get(&self, id: &str) -> Result<Alumnus> {
        self.api.get_alumnus(id).await
    }

    fn validated(&self, form: AlumnusForm) -> Result<AlumnusForm> {
        let form = form.normalized();

        if form.full_name.is_empty() {
            return Err(RegistryError::InvalidInput("Full name is required".to_string()));
        }
        if !(1900..=2100).contains(&form.graduation_year) {
            return Err(RegistryError::InvalidInput(format!(
                "Graduation year {} is out of range",
                form.graduation_year
            )));
        }
        if let Some(email) = &form.email {
            if !self.email_pattern.is_match(email) {
                return Err(RegistryError::InvalidInput(format!("Invalid email '{}'", email)));
            }
        }

        Ok(form)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_year_filter(&mut self, year: impl Into<String>) {
        self.year_filter = year.into();
    }

    pub fn records(&self) -> &[Alumnus] {
        &self.list
    }

    /// Records in display order after search/filter
    pub fn filtered(&self) -> Vec<&Alumnus> {
        if self.features.search_filter {
            filter_alumni(&self.list, &self.query, &self.year_filter)
        } else {
            self.list.iter().collect()
        }
    }

    pub fn year_options(&self) -> Vec<i32> {
        year_options(&self.list)
    }

    /// CSV text of the filtered list
    pub fn csv(&self) -> String {
        alumni_to_csv(self.filtered())
    }

    /// Write the filtered list to `alumni.csv`
    pub async fn export_csv(&self, downloads: &Downloads) -> Result<PathBuf> {
        if !self.features.csv_export {
            return Err(RegistryError::InvalidInput("CSV export is disabled".to_string()));
        }
        let csv = self.csv();
        let path = downloads.save("csv", ALUMNI_CSV_FILE, csv.as_bytes()).await?;
        info!(rows = self.filtered().len(), path = %path.display(), "Alumni exported");
        Ok(path)
    }

    pub fn render(&self, loc: &Localizer) -> String {
        let mut out = section_title(loc.t("alumni"));

        if self.features.search_filter {
            let years = self
                .year_options()
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "{}: {} | {}: {} [{}]\n",
                loc.t("search"),
                self.query,
                loc.t("filter_year"),
                if self.year_filter.is_empty() { "-" } else { &self.year_filter },
                years
            ));
        }

        let headers = [
            loc.t("full_name"),
            loc.t("grad_year"),
            loc.t("bac"),
            loc.t("path"),
            loc.t("email"),
            loc.t("phone"),
        ];
        let rows: Vec<Vec<String>> = self
            .filtered()
            .into_iter()
            .map(|a| {
                vec![
                    a.full_name.clone(),
                    a.graduation_year.to_string(),
                    loc.t(if a.bacalaureat_passed { "yes" } else { "no" }).to_string(),
                    loc.t(a.path.label_key()).to_string(),
                    a.email.clone().unwrap_or_else(|| "-".to_string()),
                    a.phone.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        out.push_str(&render_table(&headers, &rows));
        out
    }
}
