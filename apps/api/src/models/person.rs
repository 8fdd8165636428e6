use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Urgency {
    #[serde(rename = "Baixa")]
    Low,
    Normal,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Urgente")]
    Urgent,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Baixa",
            Urgency::Normal => "Normal",
            Urgency::High => "Alta",
            Urgency::Urgent => "Urgente",
        }
    }

    /// High and Urgent people surface on the dashboard.
    pub fn is_priority(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Urgent)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    #[serde(rename = "Feminino")]
    Female,
    #[serde(rename = "Masculino")]
    Male,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaritalStatus {
    #[serde(rename = "Solteiro(a)")]
    Single,
    #[serde(rename = "Casado(a)")]
    Married,
    #[serde(rename = "Divorciado(a)")]
    Divorced,
    #[serde(rename = "Viúvo(a)")]
    Widowed,
}

/// Why someone left active follow-up. `Integrated` is the successful outcome
/// counted by the completion-time and monthly reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArchiveReason {
    #[serde(rename = "Integrado(a) na igreja")]
    Integrated,
    #[serde(rename = "Mudou de cidade/igreja")]
    Moved,
    #[serde(rename = "Não quer mais contato")]
    NoFurtherContact,
    #[serde(rename = "Afastou-se/Saiu da igreja")]
    LeftChurch,
    #[serde(rename = "Outro motivo")]
    Other,
}

impl ArchiveReason {
    pub fn label(&self) -> &'static str {
        match self {
            ArchiveReason::Integrated => "Integrado(a) na igreja",
            ArchiveReason::Moved => "Mudou de cidade/igreja",
            ArchiveReason::NoFurtherContact => "Não quer mais contato",
            ArchiveReason::LeftChurch => "Afastou-se/Saiu da igreja",
            ArchiveReason::Other => "Outro motivo",
        }
    }
}

impl fmt::Display for ArchiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub sex: Sex,
    pub marital_status: MaritalStatus,
    pub created_at: DateTime<Utc>,
    pub decision_date: DateTime<Utc>,
    pub journey_id: String,
    /// Belongs to `journey_id`'s stages, or is the archive sentinel while archived.
    pub stage_id: String,
    pub responsible_id: String,
    pub urgency: Urgency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_visit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_visit_due: Option<DateTime<Utc>>,
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_reason: Option<ArchiveReason>,
}

/// Intake form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPersonData {
    pub name: String,
    pub sex: Sex,
    /// Derived from `birth_date` when omitted.
    #[serde(default)]
    pub age: Option<u32>,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub invited_by: Option<String>,
    pub journey_id: String,
    pub responsible_id: String,
    /// Defaults to the registration moment.
    #[serde(default)]
    pub decision_date: Option<DateTime<Utc>>,
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub accepts_visit: bool,
    #[serde(default)]
    pub visit_availability: Option<String>,
}

/// Partial edit of a person's details. Journey, stage, urgency and archive
/// state only change through their dedicated write paths.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub sex: Option<Sex>,
    pub marital_status: Option<MaritalStatus>,
    pub invited_by: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub accepts_visit: Option<bool>,
    pub visit_availability: Option<String>,
    pub responsible_id: Option<String>,
    pub decision_date: Option<DateTime<Utc>>,
    pub first_visit_due: Option<DateTime<Utc>>,
}

impl PersonUpdate {
    pub fn apply_to(self, person: &mut Person) {
        if let Some(name) = self.name {
            person.name = name.trim().to_string();
        }
        if let Some(age) = self.age {
            person.age = age;
        }
        if let Some(phone) = self.phone {
            person.phone = phone.trim().to_string();
        }
        if let Some(address) = self.address {
            person.address = address;
        }
        if let Some(sex) = self.sex {
            person.sex = sex;
        }
        if let Some(status) = self.marital_status {
            person.marital_status = status;
        }
        if self.invited_by.is_some() {
            person.invited_by = self.invited_by;
        }
        if self.birth_date.is_some() {
            person.birth_date = self.birth_date;
        }
        if self.accepts_visit.is_some() {
            person.accepts_visit = self.accepts_visit;
        }
        if self.visit_availability.is_some() {
            person.visit_availability = self.visit_availability;
        }
        if let Some(responsible_id) = self.responsible_id {
            person.responsible_id = responsible_id;
        }
        if let Some(decision_date) = self.decision_date {
            person.decision_date = decision_date;
        }
        if self.first_visit_due.is_some() {
            person.first_visit_due = self.first_visit_due;
        }
    }
}
