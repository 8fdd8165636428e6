//! Stage transition engine.
//!
//! Applies a person's move between stages, into the archive or back out of it,
//! and describes the move as one activity entry. Permission checks belong to
//! the caller; the engine trusts whoever invokes it.

use serde::Deserialize;

use crate::errors::AppError;
use crate::journeys::catalog::{is_archive_sentinel, ARCHIVED_STAGE_ID};
use crate::journeys::JourneyCatalog;
use crate::models::activity::ActivityKind;
use crate::models::person::{ArchiveReason, Person};

/// Where a person is being moved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Destination {
    /// An ordinary stage of the person's journey. Moving backwards is allowed.
    Stage { stage_id: String },
    Archive { reason: ArchiveReason },
    Restore,
}

/// The activity entry a successful transition produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    pub kind: ActivityKind,
    pub details: String,
}

/// Mutates `person` in place. On error the person is left untouched.
pub fn apply_transition(
    person: &mut Person,
    destination: &Destination,
    catalog: &JourneyCatalog,
) -> Result<TransitionRecord, AppError> {
    match destination {
        Destination::Stage { stage_id } => move_to_stage(person, stage_id, catalog),
        Destination::Archive { reason } => archive(person, *reason),
        Destination::Restore => restore(person, catalog),
    }
}

fn move_to_stage(
    person: &mut Person,
    stage_id: &str,
    catalog: &JourneyCatalog,
) -> Result<TransitionRecord, AppError> {
    if person.is_archived {
        return Err(AppError::Conflict(format!(
            "{} is archived; restore before moving between stages",
            person.name
        )));
    }
    if is_archive_sentinel(stage_id) {
        return Err(AppError::Validation(
            "Archiving requires a reason; use the archive transition".to_string(),
        ));
    }
    if !catalog.is_stage_of(stage_id, &person.journey_id) {
        return Err(AppError::Validation(format!(
            "Stage '{stage_id}' does not belong to journey '{}'",
            person.journey_id
        )));
    }

    let stage_name = catalog.stage_name(stage_id).unwrap_or(stage_id).to_string();
    person.stage_id = stage_id.to_string();

    Ok(TransitionRecord {
        kind: ActivityKind::StageChanged {
            stage_id: stage_id.to_string(),
        },
        details: format!("moveu para o estágio \"{stage_name}\""),
    })
}

fn archive(person: &mut Person, reason: ArchiveReason) -> Result<TransitionRecord, AppError> {
    if person.is_archived {
        return Err(AppError::Conflict(format!("{} is already archived", person.name)));
    }

    person.is_archived = true;
    person.archive_reason = Some(reason);
    person.stage_id = ARCHIVED_STAGE_ID.to_string();

    Ok(TransitionRecord {
        kind: ActivityKind::Archived { reason },
        details: format!("arquivado com o motivo: {reason}"),
    })
}

/// Always lands on the journey's first stage, whatever was held before archiving.
fn restore(person: &mut Person, catalog: &JourneyCatalog) -> Result<TransitionRecord, AppError> {
    if !person.is_archived {
        return Err(AppError::Conflict(format!("{} is not archived", person.name)));
    }

    let journey_id = catalog.resolve_journey_id(&person.journey_id).to_string();
    let first_stage = catalog
        .first_stage(&journey_id)
        .ok_or_else(|| anyhow::anyhow!("journey '{journey_id}' has no stages"))?
        .id
        .clone();

    person.is_archived = false;
    person.archive_reason = None;
    person.journey_id = journey_id;
    person.stage_id = first_stage;

    Ok(TransitionRecord {
        kind: ActivityKind::Unarchived,
        details: "foi desarquivado".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::{MaritalStatus, Sex, Urgency};
    use chrono::Utc;

    fn person(journey_id: &str, stage_id: &str) -> Person {
        Person {
            id: "person-x".to_string(),
            name: "Igor Ramos".to_string(),
            age: 40,
            phone: "11911112222".to_string(),
            address: String::new(),
            sex: Sex::Male,
            marital_status: MaritalStatus::Married,
            created_at: Utc::now(),
            decision_date: Utc::now(),
            journey_id: journey_id.to_string(),
            stage_id: stage_id.to_string(),
            responsible_id: "user-lider-1".to_string(),
            urgency: Urgency::Normal,
            invited_by: None,
            birth_date: None,
            accepts_visit: None,
            visit_availability: None,
            first_visit_due: None,
            is_archived: false,
            archive_reason: None,
        }
    }

    fn to_stage(id: &str) -> Destination {
        Destination::Stage {
            stage_id: id.to_string(),
        }
    }

    #[test]
    fn test_move_forward_records_stage_name() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "contato-inicial");
        let record = apply_transition(&mut p, &to_stage("discipulado-1"), &catalog).unwrap();
        assert_eq!(p.stage_id, "discipulado-1");
        assert_eq!(record.details, "moveu para o estágio \"3. Discipulado Bloco 1\"");
        assert_eq!(
            record.kind,
            ActivityKind::StageChanged {
                stage_id: "discipulado-1".to_string()
            }
        );
    }

    #[test]
    fn test_regression_is_allowed() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "entrevista-pastoral");
        apply_transition(&mut p, &to_stage("contato-inicial"), &catalog).unwrap();
        assert_eq!(p.stage_id, "contato-inicial");
    }

    #[test]
    fn test_stage_from_other_journey_rejected() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "contato-inicial");
        let err = apply_transition(&mut p, &to_stage("visita-pastoral"), &catalog).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(p.stage_id, "contato-inicial");
    }

    #[test]
    fn test_sentinel_not_reachable_as_plain_stage() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "contato-inicial");
        assert!(apply_transition(&mut p, &to_stage(ARCHIVED_STAGE_ID), &catalog).is_err());
        assert!(!p.is_archived);
    }

    #[test]
    fn test_archive_sets_sentinel_and_reason() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("reconciliacao", "conversa-lider");
        let record = apply_transition(
            &mut p,
            &Destination::Archive {
                reason: ArchiveReason::Moved,
            },
            &catalog,
        )
        .unwrap();
        assert!(p.is_archived);
        assert_eq!(p.archive_reason, Some(ArchiveReason::Moved));
        assert_eq!(p.stage_id, ARCHIVED_STAGE_ID);
        assert!(record.details.contains("Mudou de cidade/igreja"));
    }

    #[test]
    fn test_archive_twice_conflicts() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "contato-inicial");
        let archive = Destination::Archive {
            reason: ArchiveReason::Other,
        };
        apply_transition(&mut p, &archive, &catalog).unwrap();
        let err = apply_transition(&mut p, &archive, &catalog).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_restore_resets_to_first_stage_of_own_journey() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("reativacao", "frequencia-regular");
        apply_transition(
            &mut p,
            &Destination::Archive {
                reason: ArchiveReason::Integrated,
            },
            &catalog,
        )
        .unwrap();
        let record = apply_transition(&mut p, &Destination::Restore, &catalog).unwrap();
        assert!(!p.is_archived);
        assert_eq!(p.archive_reason, None);
        assert_eq!(p.stage_id, "primeiro-contato");
        assert_eq!(record.kind, ActivityKind::Unarchived);
    }

    #[test]
    fn test_restore_with_missing_journey_uses_default() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("", ARCHIVED_STAGE_ID);
        p.is_archived = true;
        p.archive_reason = Some(ArchiveReason::Other);
        apply_transition(&mut p, &Destination::Restore, &catalog).unwrap();
        assert_eq!(p.journey_id, "novo-convertido");
        assert_eq!(p.stage_id, "contato-inicial");
    }

    #[test]
    fn test_moving_archived_person_conflicts() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", ARCHIVED_STAGE_ID);
        p.is_archived = true;
        let err = apply_transition(&mut p, &to_stage("discipulado-1"), &catalog).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_restore_active_person_conflicts() {
        let catalog = JourneyCatalog::standard();
        let mut p = person("novo-convertido", "contato-inicial");
        assert!(apply_transition(&mut p, &Destination::Restore, &catalog).is_err());
    }

    #[test]
    fn test_destination_wire_format() {
        let dest: Destination =
            serde_json::from_str(r#"{"to": "archive", "reason": "Outro motivo"}"#).unwrap();
        assert_eq!(
            dest,
            Destination::Archive {
                reason: ArchiveReason::Other
            }
        );
        let dest: Destination = serde_json::from_str(r#"{"to": "restore"}"#).unwrap();
        assert_eq!(dest, Destination::Restore);
    }
}
