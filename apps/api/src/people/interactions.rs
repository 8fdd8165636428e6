use crate::models::interaction::{InteractionItem, InteractionSource, Note, Touchpoint};
use crate::models::user::User;

pub const CONFIDENTIAL_PLACEHOLDER: &str = "[Nota confidencial - Apenas para Pastor]";

/// Merges a person's touchpoints and notes newest first, hiding confidential
/// note bodies from anyone who may not read them.
pub fn timeline(
    touchpoints: &[&Touchpoint],
    notes: &[&Note],
    users: &[User],
    viewer: &User,
) -> Vec<InteractionItem> {
    let author_name = |id: &str| users.iter().find(|u| u.id == id).map(|u| u.name.clone());

    let mut items: Vec<InteractionItem> = touchpoints
        .iter()
        .map(|t| InteractionItem {
            id: t.id.clone(),
            source: InteractionSource::Touchpoint,
            touchpoint_type: Some(t.kind),
            at: t.at,
            author_id: t.author_id.clone(),
            author_name: author_name(&t.author_id),
            body: t.body.clone(),
            confidential: false,
        })
        .collect();

    items.extend(notes.iter().map(|n| {
        let hidden = n.confidential && !viewer.role.can_view_confidential();
        InteractionItem {
            id: n.id.clone(),
            source: InteractionSource::Note,
            touchpoint_type: None,
            at: n.at,
            author_id: n.author_id.clone(),
            author_name: author_name(&n.author_id),
            body: if hidden {
                CONFIDENTIAL_PLACEHOLDER.to_string()
            } else {
                n.body.clone()
            },
            confidential: n.confidential,
        }
    }));

    items.sort_by(|a, b| b.at.cmp(&a.at));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interaction::TouchpointType;
    use crate::models::user::UserRole;
    use chrono::{TimeZone, Utc};

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            name: id.to_uppercase(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn fixtures() -> (Touchpoint, Note) {
        let touchpoint = Touchpoint {
            id: "tp-1".to_string(),
            person_id: "person-1".to_string(),
            author_id: "lider".to_string(),
            at: Utc.with_ymd_and_hms(2024, 7, 16, 15, 0, 0).unwrap(),
            kind: TouchpointType::WhatsApp,
            body: "Mensagem de boas-vindas".to_string(),
        };
        let note = Note {
            id: "note-1".to_string(),
            person_id: "person-1".to_string(),
            author_id: "pastor".to_string(),
            at: Utc.with_ymd_and_hms(2024, 7, 21, 9, 0, 0).unwrap(),
            body: "Precisa de atenção especial".to_string(),
            confidential: true,
        };
        (touchpoint, note)
    }

    #[test]
    fn test_confidential_note_hidden_from_leader() {
        let (tp, note) = fixtures();
        let users = vec![user("pastor", UserRole::Pastor), user("lider", UserRole::Leader)];
        let items = timeline(&[&tp], &[&note], &users, &users[1]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "note-1");
        assert_eq!(items[0].body, CONFIDENTIAL_PLACEHOLDER);
        assert_eq!(items[1].body, "Mensagem de boas-vindas");
    }

    #[test]
    fn test_confidential_note_visible_to_pastor() {
        let (tp, note) = fixtures();
        let users = vec![user("pastor", UserRole::Pastor), user("lider", UserRole::Leader)];
        let items = timeline(&[&tp], &[&note], &users, &users[0]);
        assert_eq!(items[0].body, "Precisa de atenção especial");
        assert_eq!(items[0].author_name.as_deref(), Some("PASTOR"));
    }
}
