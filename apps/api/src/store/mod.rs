//! In-memory tracker store.
//!
//! One process-lifetime set of collections, reseeded on restart. Every write
//! runs to completion under a single `parking_lot` write lock together with
//! its activity entry; the lock is never held across an `.await`.

pub mod seed;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::journeys::JourneyCatalog;
use crate::models::activity::{ActivityKind, ActivityLog};
use crate::models::interaction::{
    Attachment, InteractionItem, NewInteraction, Note, Notification, Touchpoint,
};
use crate::models::person::{NewPersonData, Person, PersonUpdate, Urgency};
use crate::models::user::{NewUserData, User, UserUpdate};
use crate::people::intake::{build_person, validate_new_person, validate_update};
use crate::people::interactions::timeline;
use crate::people::transitions::{apply_transition, Destination};
use crate::people::PeopleFilter;

/// The shared collections. People are kept newest first.
#[derive(Debug, Clone, Default)]
pub struct TrackerData {
    pub users: Vec<User>,
    pub people: Vec<Person>,
    pub touchpoints: Vec<Touchpoint>,
    pub notes: Vec<Note>,
    pub activity: Vec<ActivityLog>,
    pub attachments: Vec<Attachment>,
    pub notifications: Vec<Notification>,
}

impl TrackerData {
    fn person_mut(&mut self, person_id: &str) -> Result<&mut Person, AppError> {
        self.people
            .iter_mut()
            .find(|p| p.id == person_id)
            .ok_or_else(|| person_not_found(person_id))
    }

    fn person(&self, person_id: &str) -> Result<&Person, AppError> {
        self.people
            .iter()
            .find(|p| p.id == person_id)
            .ok_or_else(|| person_not_found(person_id))
    }

    fn append_activity(
        &mut self,
        person_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
        kind: ActivityKind,
        details: String,
    ) {
        self.activity.push(ActivityLog {
            id: new_id("log"),
            person_id: person_id.to_string(),
            user_id: user_id.to_string(),
            at,
            kind,
            details,
        });
    }
}

pub struct TrackerStore {
    catalog: JourneyCatalog,
    data: RwLock<TrackerData>,
}

impl TrackerStore {
    pub fn new(catalog: JourneyCatalog, data: TrackerData) -> Self {
        Self {
            catalog,
            data: RwLock::new(data),
        }
    }

    /// The standard catalog plus the demo fixtures.
    pub fn seeded() -> Self {
        Self::new(JourneyCatalog::standard(), seed::tracker_data())
    }

    pub fn catalog(&self) -> &JourneyCatalog {
        &self.catalog
    }

    /// Runs a read-only computation over a consistent view of all collections.
    pub fn read<R>(&self, f: impl FnOnce(&TrackerData) -> R) -> R {
        f(&self.data.read())
    }

    // ── Users ───────────────────────────────────────────────────────────────

    pub fn users(&self) -> Vec<User> {
        self.data.read().users.clone()
    }

    pub fn user(&self, user_id: &str) -> Option<User> {
        self.data.read().users.iter().find(|u| u.id == user_id).cloned()
    }

    pub fn add_user(&self, new_user: NewUserData) -> Result<User, AppError> {
        let mut data = self.data.write();
        let name = non_blank("name", &new_user.name)?;
        let email = non_blank("email", &new_user.email)?;
        ensure_unique_email(&data.users, &email, None)?;

        let user = User {
            id: new_id("user"),
            name,
            email,
            role: new_user.role,
        };
        data.users.insert(0, user.clone());
        info!("Added user {} ({})", user.id, user.role);
        Ok(user)
    }

    pub fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User, AppError> {
        let mut data = self.data.write();
        let name = update.name.as_deref().map(|n| non_blank("name", n)).transpose()?;
        let email = update.email.as_deref().map(|e| non_blank("email", e)).transpose()?;
        if let Some(email) = &email {
            ensure_unique_email(&data.users, email, Some(user_id))?;
        }

        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        info!("Updated user {user_id}");
        Ok(user.clone())
    }

    pub fn delete_user(&self, user_id: &str, actor: &User) -> Result<(), AppError> {
        if user_id == actor.id {
            return Err(AppError::Conflict("Users cannot delete themselves".to_string()));
        }
        let mut data = self.data.write();
        let assigned = data
            .people
            .iter()
            .filter(|p| p.responsible_id == user_id)
            .count();
        if assigned > 0 {
            return Err(AppError::Conflict(format!(
                "User {user_id} is still responsible for {assigned} people; reassign them first"
            )));
        }
        let before = data.users.len();
        data.users.retain(|u| u.id != user_id);
        if data.users.len() == before {
            return Err(AppError::NotFound(format!("User {user_id} not found")));
        }
        info!("Deleted user {user_id}");
        Ok(())
    }

    // ── People ──────────────────────────────────────────────────────────────

    pub fn list_people(&self, filter: &PeopleFilter) -> Vec<Person> {
        self.data
            .read()
            .people
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn person(&self, person_id: &str) -> Result<Person, AppError> {
        self.data.read().person(person_id).cloned()
    }

    pub fn register_person(
        &self,
        new_person: NewPersonData,
        actor: &User,
        now: DateTime<Utc>,
        first_visit_due_days: i64,
    ) -> Result<Person, AppError> {
        let mut data = self.data.write();
        validate_new_person(&new_person, &self.catalog, &data.users)?;

        let person = build_person(new_person, &self.catalog, now, first_visit_due_days)?;
        data.people.insert(0, person.clone());
        data.append_activity(
            &person.id,
            &actor.id,
            now,
            ActivityKind::PersonAdded,
            format!("adicionou {}", person.name),
        );
        info!(
            "Registered {} in journey {} at stage {}",
            person.id, person.journey_id, person.stage_id
        );
        Ok(person)
    }

    pub fn update_person(
        &self,
        person_id: &str,
        update: PersonUpdate,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<Person, AppError> {
        let mut data = self.data.write();
        validate_update(&update, &data.users)?;

        let person = data.person_mut(person_id)?;
        update.apply_to(person);
        let updated = person.clone();
        data.append_activity(
            person_id,
            &actor.id,
            now,
            ActivityKind::DetailsUpdated,
            "atualizou os detalhes".to_string(),
        );
        info!("Updated details of {person_id}");
        Ok(updated)
    }

    pub fn set_urgency(
        &self,
        person_id: &str,
        urgency: Urgency,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<Person, AppError> {
        let mut data = self.data.write();
        let person = data.person_mut(person_id)?;
        person.urgency = urgency;
        let updated = person.clone();
        data.append_activity(
            person_id,
            &actor.id,
            now,
            ActivityKind::UrgencyChanged { urgency },
            format!("alterou a urgência para {urgency}"),
        );
        info!("Set urgency of {person_id} to {urgency}");
        Ok(updated)
    }

    /// Applies a stage move, archive or restore and appends exactly one activity entry.
    pub fn transition(
        &self,
        person_id: &str,
        destination: &Destination,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<Person, AppError> {
        let mut data = self.data.write();
        let person = data.person_mut(person_id)?;
        let record = apply_transition(person, destination, &self.catalog)?;
        let updated = person.clone();
        data.append_activity(person_id, &actor.id, now, record.kind, record.details);
        info!(
            "Transitioned {person_id} to stage {} (archived: {})",
            updated.stage_id, updated.is_archived
        );
        Ok(updated)
    }

    /// Irreversible. Touchpoints, notes, attachments and notifications go with
    /// the person; the activity history is kept for the audit trail.
    pub fn delete_person(&self, person_id: &str) -> Result<Person, AppError> {
        let mut data = self.data.write();
        let index = data
            .people
            .iter()
            .position(|p| p.id == person_id)
            .ok_or_else(|| person_not_found(person_id))?;
        let removed = data.people.remove(index);
        data.touchpoints.retain(|t| t.person_id != person_id);
        data.notes.retain(|n| n.person_id != person_id);
        data.attachments.retain(|a| a.person_id != person_id);
        data.notifications.retain(|n| n.person_id != person_id);
        info!("Deleted {person_id} and its interactions");
        Ok(removed)
    }

    // ── Interactions and history ────────────────────────────────────────────

    pub fn add_interaction(
        &self,
        person_id: &str,
        interaction: NewInteraction,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<InteractionItem, AppError> {
        let body = non_blank("body", &interaction.body)?;
        let mut data = self.data.write();
        data.person(person_id)?;

        let item = match interaction.kind.touchpoint_type() {
            Some(kind) => {
                let touchpoint = Touchpoint {
                    id: new_id("touch"),
                    person_id: person_id.to_string(),
                    author_id: actor.id.clone(),
                    at: now,
                    kind,
                    body,
                };
                data.touchpoints.push(touchpoint.clone());
                timeline(&[&touchpoint], &[], &data.users, actor)
            }
            None => {
                let note = Note {
                    id: new_id("note"),
                    person_id: person_id.to_string(),
                    author_id: actor.id.clone(),
                    at: now,
                    body,
                    confidential: interaction.confidential,
                };
                data.notes.push(note.clone());
                timeline(&[], &[&note], &data.users, actor)
            }
        }
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("interaction timeline was empty"))?;

        data.append_activity(
            person_id,
            &actor.id,
            now,
            ActivityKind::InteractionAdded,
            "registrou uma interação".to_string(),
        );
        info!("Logged interaction {} for {person_id}", item.id);
        Ok(item)
    }

    pub fn interactions(
        &self,
        person_id: &str,
        viewer: &User,
    ) -> Result<Vec<InteractionItem>, AppError> {
        let data = self.data.read();
        data.person(person_id)?;
        let touchpoints: Vec<&Touchpoint> = data
            .touchpoints
            .iter()
            .filter(|t| t.person_id == person_id)
            .collect();
        let notes: Vec<&Note> = data.notes.iter().filter(|n| n.person_id == person_id).collect();
        Ok(timeline(&touchpoints, &notes, &data.users, viewer))
    }

    /// Most recent touchpoint, the "last contact" fed to the advisor.
    pub fn last_contact_at(&self, person_id: &str) -> Option<DateTime<Utc>> {
        self.data
            .read()
            .touchpoints
            .iter()
            .filter(|t| t.person_id == person_id)
            .map(|t| t.at)
            .max()
    }

    pub fn activity_for(&self, person_id: &str) -> Vec<ActivityLog> {
        let mut logs: Vec<ActivityLog> = self
            .data
            .read()
            .activity
            .iter()
            .filter(|l| l.person_id == person_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.at.cmp(&a.at));
        logs
    }

    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityLog> {
        self.read(|data| recent_activity(&data.activity, limit))
    }

    pub fn attachments_for(&self, person_id: &str) -> Result<Vec<Attachment>, AppError> {
        let data = self.data.read();
        data.person(person_id)?;
        Ok(data
            .attachments
            .iter()
            .filter(|a| a.person_id == person_id)
            .cloned()
            .collect())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = self.data.read().notifications.clone();
        notifications.sort_by(|a, b| b.at.cmp(&a.at));
        notifications
    }
}

/// Newest first, capped at `limit`.
pub fn recent_activity(logs: &[ActivityLog], limit: usize) -> Vec<ActivityLog> {
    let mut logs = logs.to_vec();
    logs.sort_by(|a, b| b.at.cmp(&a.at));
    logs.truncate(limit);
    logs
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

fn person_not_found(person_id: &str) -> AppError {
    AppError::NotFound(format!("Person {person_id} not found"))
}

fn non_blank(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn ensure_unique_email(users: &[User], email: &str, except: Option<&str>) -> Result<(), AppError> {
    let taken = users
        .iter()
        .any(|u| Some(u.id.as_str()) != except && u.email.eq_ignore_ascii_case(email));
    if taken {
        return Err(AppError::Conflict(format!("Email {email} is already in use")));
    }
    Ok(())
}
