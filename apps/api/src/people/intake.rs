//! Intake and edit validation. A failed validation blocks the write entirely.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::journeys::JourneyCatalog;
use crate::models::person::{NewPersonData, Person, PersonUpdate, Urgency};
use crate::models::user::User;

/// Checks the required intake fields before anything is created.
pub fn validate_new_person(
    data: &NewPersonData,
    catalog: &JourneyCatalog,
    users: &[User],
) -> Result<(), AppError> {
    require_non_blank("name", &data.name)?;
    require_non_blank("phone", &data.phone)?;
    if data.age.is_none() && data.birth_date.is_none() {
        return Err(AppError::Validation(
            "age is required (or a birth_date to derive it from)".to_string(),
        ));
    }
    if catalog.journey(&data.journey_id).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown journey '{}'",
            data.journey_id
        )));
    }
    require_responsible(&data.responsible_id, users)?;
    Ok(())
}

pub fn validate_update(update: &PersonUpdate, users: &[User]) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        require_non_blank("name", name)?;
    }
    if let Some(phone) = &update.phone {
        require_non_blank("phone", phone)?;
    }
    if let Some(responsible_id) = &update.responsible_id {
        require_responsible(responsible_id, users)?;
    }
    Ok(())
}

/// `now` plus the configured number of days; errors instead of overflowing.
pub fn first_visit_deadline(
    now: DateTime<Utc>,
    first_visit_due_days: i64,
) -> Result<DateTime<Utc>, AppError> {
    Duration::try_days(first_visit_due_days)
        .and_then(|days| now.checked_add_signed(days))
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "first-visit deadline of {first_visit_due_days} days is out of range"
            ))
        })
}

/// Builds the record for a validated intake payload.
pub fn build_person(
    data: NewPersonData,
    catalog: &JourneyCatalog,
    now: DateTime<Utc>,
    first_visit_due_days: i64,
) -> Result<Person, AppError> {
    let first_visit_due = first_visit_deadline(now, first_visit_due_days)?;
    let age = data
        .age
        .or_else(|| data.birth_date.map(|b| age_on(b.date_naive(), now.date_naive())))
        .unwrap_or_default();
    let stage_id = catalog.intake_stage_id(&data.journey_id).to_string();

    Ok(Person {
        id: format!("person-{}", Uuid::new_v4()),
        name: data.name.trim().to_string(),
        age,
        phone: data.phone.trim().to_string(),
        address: data.address,
        sex: data.sex,
        marital_status: data.marital_status,
        created_at: now,
        decision_date: data.decision_date.unwrap_or(now),
        journey_id: data.journey_id,
        stage_id,
        responsible_id: data.responsible_id,
        urgency: Urgency::Normal,
        invited_by: data.invited_by.filter(|s| !s.trim().is_empty()),
        birth_date: data.birth_date,
        accepts_visit: Some(data.accepts_visit),
        visit_availability: data.visit_availability.filter(|s| !s.trim().is_empty()),
        first_visit_due: Some(first_visit_due),
        is_archived: false,
        archive_reason: None,
    })
}

/// Whole years between a birth date and `today`; zero for future dates.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_responsible(responsible_id: &str, users: &[User]) -> Result<(), AppError> {
    match users.iter().find(|u| u.id == responsible_id) {
        Some(_) => Ok(()),
        None => Err(AppError::Validation(format!(
            "Unknown responsible user '{responsible_id}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::{MaritalStatus, Sex};
    use crate::models::user::UserRole;
    use chrono::TimeZone;

    fn leader() -> User {
        User {
            id: "user-lider-1".to_string(),
            name: "João Silva".to_string(),
            email: "joao.silva@example.com".to_string(),
            role: UserRole::Leader,
        }
    }

    fn intake(journey_id: &str) -> NewPersonData {
        NewPersonData {
            name: "  Helena Rocha ".to_string(),
            sex: Sex::Female,
            age: Some(30),
            phone: "11900001111".to_string(),
            address: "Rua A, 1".to_string(),
            invited_by: Some(String::new()),
            journey_id: journey_id.to_string(),
            responsible_id: "user-lider-1".to_string(),
            decision_date: None,
            marital_status: MaritalStatus::Single,
            birth_date: None,
            accepts_visit: true,
            visit_availability: None,
        }
    }

    #[test]
    fn test_new_convert_starts_at_initial_contact() {
        let catalog = JourneyCatalog::standard();
        let now = Utc.with_ymd_and_hms(2024, 7, 20, 10, 0, 0).unwrap();
        let person = build_person(intake("novo-convertido"), &catalog, now, 7).unwrap();
        assert_eq!(person.stage_id, "contato-inicial");
        assert_eq!(person.urgency, Urgency::Normal);
        assert!(!person.is_archived);
        assert_eq!(person.created_at, now);
        assert_eq!(person.decision_date, now);
        assert_eq!(person.first_visit_due, Some(now + Duration::days(7)));
        assert_eq!(person.name, "Helena Rocha");
        assert_eq!(person.invited_by, None);
    }

    #[test]
    fn test_other_journeys_start_at_welcome_stage() {
        let catalog = JourneyCatalog::standard();
        let now = Utc::now();
        for journey in ["reconciliacao", "reativacao"] {
            let person = build_person(intake(journey), &catalog, now, 7).unwrap();
            assert_eq!(person.stage_id, "acolhimento-inicial");
        }
    }

    #[test]
    fn test_out_of_range_deadline_is_an_error() {
        let catalog = JourneyCatalog::standard();
        let now = Utc::now();
        let err =
            build_person(intake("novo-convertido"), &catalog, now, 10_000_000_000).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(first_visit_deadline(now, i64::MAX).is_err());
    }

    #[test]
    fn test_missing_phone_blocks_intake() {
        let catalog = JourneyCatalog::standard();
        let mut data = intake("novo-convertido");
        data.phone = "   ".to_string();
        let err = validate_new_person(&data, &catalog, &[leader()]).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("phone")));
    }

    #[test]
    fn test_unknown_journey_blocks_intake() {
        let catalog = JourneyCatalog::standard();
        let data = intake("jornada-inexistente");
        assert!(validate_new_person(&data, &catalog, &[leader()]).is_err());
    }

    #[test]
    fn test_unknown_responsible_blocks_intake() {
        let catalog = JourneyCatalog::standard();
        let data = intake("novo-convertido");
        assert!(validate_new_person(&data, &catalog, &[]).is_err());
    }

    #[test]
    fn test_age_required_unless_birth_date_given() {
        let catalog = JourneyCatalog::standard();
        let mut data = intake("novo-convertido");
        data.age = None;
        assert!(validate_new_person(&data, &catalog, &[leader()]).is_err());

        data.birth_date = Some(Utc.with_ymd_and_hms(1996, 5, 10, 0, 0, 0).unwrap());
        assert!(validate_new_person(&data, &catalog, &[leader()]).is_ok());

        let now = Utc.with_ymd_and_hms(2024, 7, 20, 10, 0, 0).unwrap();
        let person = build_person(data, &catalog, now, 7).unwrap();
        assert_eq!(person.age, 28);
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = NaiveDate::from_ymd_opt(2000, 8, 15).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 8, 14).unwrap()), 23);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()), 24);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()), 0);
    }

    #[test]
    fn test_blank_name_update_rejected() {
        let update = PersonUpdate {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&update, &[leader()]).is_err());
    }
}
