//! Demo fixtures the store is seeded with at startup.

use chrono::{DateTime, TimeZone, Utc};

use crate::journeys::catalog::ARCHIVED_STAGE_ID;
use crate::models::activity::{ActivityKind, ActivityLog};
use crate::models::interaction::{Attachment, Note, Notification, Touchpoint, TouchpointType};
use crate::models::person::{ArchiveReason, MaritalStatus, Person, Sex, Urgency};
use crate::models::user::{User, UserRole};
use crate::store::TrackerData;

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .unwrap_or_default()
}

fn user(id: &str, name: &str, email: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

struct Seed<'a> {
    id: &'a str,
    name: &'a str,
    age: u32,
    phone: &'a str,
    address: &'a str,
    sex: Sex,
    marital_status: MaritalStatus,
    created_at: DateTime<Utc>,
    journey_id: &'a str,
    stage_id: &'a str,
    responsible_id: &'a str,
    urgency: Urgency,
}

impl Seed<'_> {
    fn into_person(self) -> Person {
        Person {
            id: self.id.to_string(),
            name: self.name.to_string(),
            age: self.age,
            phone: self.phone.to_string(),
            address: self.address.to_string(),
            sex: self.sex,
            marital_status: self.marital_status,
            created_at: self.created_at,
            decision_date: self.created_at,
            journey_id: self.journey_id.to_string(),
            stage_id: self.stage_id.to_string(),
            responsible_id: self.responsible_id.to_string(),
            urgency: self.urgency,
            invited_by: None,
            birth_date: None,
            accepts_visit: None,
            visit_availability: None,
            first_visit_due: None,
            is_archived: false,
            archive_reason: None,
        }
    }
}

fn archived(mut person: Person, reason: ArchiveReason) -> Person {
    person.is_archived = true;
    person.archive_reason = Some(reason);
    person.stage_id = ARCHIVED_STAGE_ID.to_string();
    person
}

pub fn users() -> Vec<User> {
    vec![
        user("user-pastor-1", "Pr. Carlos Almeida", "carlos.almeida@ad.org", UserRole::Pastor),
        user("user-lider-1", "João Silva", "joao.silva@example.com", UserRole::Leader),
        user("user-lider-2", "Maria Oliveira", "maria.oliveira@example.com", UserRole::Leader),
        user("user-lider-3", "Pedro Souza", "pedro.souza@example.com", UserRole::Leader),
        user("user-usuario-1", "Ana Voluntária", "ana.voluntaria@example.com", UserRole::Volunteer),
    ]
}

pub fn people() -> Vec<Person> {
    let mut ana = Seed {
        id: "person-1",
        name: "Ana Beatriz Costa",
        age: 28,
        phone: "11987654321",
        address: "Rua das Flores, 123, Jundiaí, SP",
        sex: Sex::Female,
        marital_status: MaritalStatus::Single,
        created_at: ts(2024, 7, 20, 10, 0, 0),
        journey_id: "novo-convertido",
        stage_id: "contato-inicial",
        responsible_id: "user-lider-2",
        urgency: Urgency::Urgent,
    }
    .into_person();
    ana.invited_by = Some("Amigo".to_string());
    ana.birth_date = Some(ts(1996, 5, 10, 0, 0, 0));
    ana.accepts_visit = Some(true);
    ana.visit_availability = Some("Finais de semana, à tarde".to_string());
    ana.first_visit_due = Some(ts(2024, 7, 22, 23, 59, 59));

    let mut bruno = Seed {
        id: "person-2",
        name: "Bruno Gomes",
        age: 35,
        phone: "11912345678",
        address: "Avenida Principal, 456, Várzea Paulista, SP",
        sex: Sex::Male,
        marital_status: MaritalStatus::Married,
        created_at: ts(2024, 7, 15, 14, 30, 0),
        journey_id: "novo-convertido",
        stage_id: "visita-acolhimento",
        responsible_id: "user-lider-1",
        urgency: Urgency::High,
    }
    .into_person();
    bruno.invited_by = Some("Família".to_string());
    bruno.first_visit_due = Some(ts(2024, 7, 10, 23, 59, 59));

    let carla = Seed {
        id: "person-3",
        name: "Carla Dias",
        age: 42,
        phone: "11988887777",
        address: "Rua da Paz, 789, Jundiaí, SP",
        sex: Sex::Female,
        marital_status: MaritalStatus::Divorced,
        created_at: ts(2024, 6, 10, 11, 0, 0),
        journey_id: "reconciliacao",
        stage_id: "acolhimento-inicial",
        responsible_id: "user-lider-3",
        urgency: Urgency::Normal,
    }
    .into_person();

    let daniel = Seed {
        id: "person-4",
        name: "Daniel Martins",
        age: 22,
        phone: "11977778888",
        address: "Rua Nova, 101, Jundiaí, SP",
        sex: Sex::Male,
        marital_status: MaritalStatus::Single,
        created_at: ts(2024, 5, 1, 19, 0, 0),
        journey_id: "novo-convertido",
        stage_id: "discipulado-2",
        responsible_id: "user-lider-1",
        urgency: Urgency::Low,
    }
    .into_person();

    let eduarda = Seed {
        id: "person-5",
        name: "Eduarda Lima",
        age: 55,
        phone: "11966665555",
        address: "Alameda dos Anjos, 202, Itupeva, SP",
        sex: Sex::Female,
        marital_status: MaritalStatus::Widowed,
        created_at: ts(2024, 3, 15, 12, 0, 0),
        journey_id: "novo-convertido",
        stage_id: ARCHIVED_STAGE_ID,
        responsible_id: "user-lider-2",
        urgency: Urgency::Low,
    }
    .into_person();

    let fabio = Seed {
        id: "person-6",
        name: "Fábio Pereira",
        age: 31,
        phone: "11955554444",
        address: "Rua Antiga, 303, Jundiaí, SP",
        sex: Sex::Male,
        marital_status: MaritalStatus::Married,
        created_at: ts(2024, 1, 20, 10, 0, 0),
        journey_id: "novo-convertido",
        stage_id: ARCHIVED_STAGE_ID,
        responsible_id: "user-lider-1",
        urgency: Urgency::Normal,
    }
    .into_person();

    let gabriela = Seed {
        id: "person-7",
        name: "Gabriela Nunes",
        age: 25,
        phone: "11944443333",
        address: "Avenida da Saudade, 505, Jundiaí, SP",
        sex: Sex::Female,
        marital_status: MaritalStatus::Single,
        created_at: ts(2024, 4, 10, 10, 0, 0),
        journey_id: "reconciliacao",
        stage_id: ARCHIVED_STAGE_ID,
        responsible_id: "user-lider-3",
        urgency: Urgency::Normal,
    }
    .into_person();

    vec![
        ana,
        bruno,
        carla,
        daniel,
        archived(eduarda, ArchiveReason::Integrated),
        archived(fabio, ArchiveReason::LeftChurch),
        archived(gabriela, ArchiveReason::Integrated),
    ]
}

pub fn touchpoints() -> Vec<Touchpoint> {
    vec![
        Touchpoint {
            id: "tp-1".to_string(),
            person_id: "person-2".to_string(),
            author_id: "user-lider-1".to_string(),
            at: ts(2024, 7, 16, 15, 0, 0),
            kind: TouchpointType::WhatsApp,
            body: "Enviei mensagem de boas-vindas. Respondeu animado.".to_string(),
        },
        Touchpoint {
            id: "tp-2".to_string(),
            person_id: "person-3".to_string(),
            author_id: "user-lider-3".to_string(),
            at: ts(2024, 6, 12, 18, 0, 0),
            kind: TouchpointType::Call,
            body: "Conversei por telefone, expliquei sobre os pequenos grupos.".to_string(),
        },
    ]
}

pub fn notes() -> Vec<Note> {
    vec![Note {
        id: "note-1".to_string(),
        person_id: "person-1".to_string(),
        author_id: "user-pastor-1".to_string(),
        at: ts(2024, 7, 21, 9, 0, 0),
        body: "Convidado pelo irmão Pedro. Parece ter um coração aberto e sincero. Precisa de atenção especial.".to_string(),
        confidential: true,
    }]
}

pub fn activity() -> Vec<ActivityLog> {
    let log = |id: &str, person: &str, user: &str, at, kind, details: &str| ActivityLog {
        id: id.to_string(),
        person_id: person.to_string(),
        user_id: user.to_string(),
        at,
        kind,
        details: details.to_string(),
    };
    let integrated = ActivityKind::Archived {
        reason: ArchiveReason::Integrated,
    };
    vec![
        log(
            "log-1",
            "person-2",
            "user-lider-1",
            ts(2024, 7, 18, 10, 0, 0),
            ActivityKind::StageChanged {
                stage_id: "visita-acolhimento".to_string(),
            },
            "moveu para o estágio \"2. Visita de Acolhimento\"",
        ),
        log(
            "log-2",
            "person-4",
            "user-lider-1",
            ts(2024, 7, 1, 11, 0, 0),
            ActivityKind::StageChanged {
                stage_id: "discipulado-2".to_string(),
            },
            "moveu para o estágio \"4. Discipulado Bloco 2\"",
        ),
        log(
            "log-3",
            "person-5",
            "user-lider-2",
            ts(2024, 7, 28, 11, 0, 0),
            integrated.clone(),
            "arquivado com o motivo: Integrado(a) na igreja",
        ),
        log(
            "log-4",
            "person-7",
            "user-lider-3",
            ts(2024, 7, 20, 11, 0, 0),
            integrated,
            "arquivado com o motivo: Integrado(a) na igreja",
        ),
    ]
}

pub fn attachments() -> Vec<Attachment> {
    vec![Attachment {
        id: "att-1".to_string(),
        person_id: "person-4".to_string(),
        name: "Ficha_Discipulado_Daniel.pdf".to_string(),
        url: "#".to_string(),
        at: ts(2024, 5, 10, 10, 0, 0),
    }]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "notif-1".to_string(),
            person_id: "person-1".to_string(),
            title: "Prazo para 1º Contato Expirando".to_string(),
            description: "O prazo de 48h para o primeiro contato com Ana Beatriz Costa está prestes a expirar.".to_string(),
            at: ts(2024, 7, 21, 10, 0, 0),
        },
        Notification {
            id: "notif-2".to_string(),
            person_id: "person-2".to_string(),
            title: "Visita de Acolhimento Atrasada".to_string(),
            description: "A primeira visita para Bruno Gomes está atrasada.".to_string(),
            at: ts(2024, 7, 11, 9, 0, 0),
        },
    ]
}

pub fn tracker_data() -> TrackerData {
    TrackerData {
        users: users(),
        people: people(),
        touchpoints: touchpoints(),
        notes: notes(),
        activity: activity(),
        attachments: attachments(),
        notifications: notifications(),
    }
}
