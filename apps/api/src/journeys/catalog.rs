//! Static journey and stage reference data. Read-only at runtime.

use crate::models::journey::{Journey, Stage};

pub const NEW_CONVERT_JOURNEY_ID: &str = "novo-convertido";
pub const RECONCILIATION_JOURNEY_ID: &str = "reconciliacao";
pub const REACTIVATION_JOURNEY_ID: &str = "reativacao";

/// Journey used when a person's journey id is missing or unknown.
pub const DEFAULT_JOURNEY_ID: &str = NEW_CONVERT_JOURNEY_ID;

/// Pseudo-stage held by every archived person.
pub const ARCHIVED_STAGE_ID: &str = "arquivado";
/// Sits outside normal sequencing, so it compares past every real stage.
pub const ARCHIVED_STAGE_ORDER: u32 = 99;

/// Intake stages. Only the New Convert journey starts at its own first stage;
/// every other journey starts at the reconciliation welcome stage.
const NEW_CONVERT_INTAKE_STAGE_ID: &str = "contato-inicial";
const DEFAULT_INTAKE_STAGE_ID: &str = "acolhimento-inicial";

const JOURNEYS: &[(&str, &str)] = &[
    (NEW_CONVERT_JOURNEY_ID, "Jornada Novo Convertido"),
    (RECONCILIATION_JOURNEY_ID, "Jornada Reconciliação"),
    (REACTIVATION_JOURNEY_ID, "Jornada Reativação"),
];

// (id, name, journey, order)
const STAGES: &[(&str, &str, &str, u32)] = &[
    ("contato-inicial", "1. Contato Inicial", NEW_CONVERT_JOURNEY_ID, 1),
    ("visita-acolhimento", "2. Visita de Acolhimento", NEW_CONVERT_JOURNEY_ID, 2),
    ("discipulado-1", "3. Discipulado Bloco 1", NEW_CONVERT_JOURNEY_ID, 3),
    ("discipulado-2", "4. Discipulado Bloco 2", NEW_CONVERT_JOURNEY_ID, 4),
    ("entrevista-pastoral", "5. Entrevista Pastoral", NEW_CONVERT_JOURNEY_ID, 5),
    ("integrado", "6. Integrado", NEW_CONVERT_JOURNEY_ID, 6),
    (ARCHIVED_STAGE_ID, "Arquivado", NEW_CONVERT_JOURNEY_ID, ARCHIVED_STAGE_ORDER),
    ("acolhimento-inicial", "Acolhimento Inicial", RECONCILIATION_JOURNEY_ID, 1),
    ("conversa-lider", "Conversa com Líder", RECONCILIATION_JOURNEY_ID, 2),
    ("visita-pastoral", "Visita Pastoral", RECONCILIATION_JOURNEY_ID, 3),
    ("reintegrado", "Reintegrado", RECONCILIATION_JOURNEY_ID, 4),
    ("primeiro-contato", "Primeiro Contato", REACTIVATION_JOURNEY_ID, 1),
    ("visita-reativacao", "Visita de Reativação", REACTIVATION_JOURNEY_ID, 2),
    ("frequencia-regular", "Frequência Regular", REACTIVATION_JOURNEY_ID, 3),
];

#[derive(Debug, Clone)]
pub struct JourneyCatalog {
    journeys: Vec<Journey>,
    stages: Vec<Stage>,
}

impl JourneyCatalog {
    /// The three journeys and their stages.
    pub fn standard() -> Self {
        let journeys = JOURNEYS
            .iter()
            .map(|(id, name)| Journey {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        let stages = STAGES
            .iter()
            .map(|(id, name, journey_id, order)| Stage {
                id: id.to_string(),
                name: name.to_string(),
                journey_id: journey_id.to_string(),
                order: *order,
            })
            .collect();
        Self { journeys, stages }
    }

    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    pub fn journey(&self, journey_id: &str) -> Option<&Journey> {
        self.journeys.iter().find(|j| j.id == journey_id)
    }

    /// Looks a stage up by id across all journeys, archive sentinel included.
    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn stage_order(&self, stage_id: &str) -> Option<u32> {
        self.stage(stage_id).map(|s| s.order)
    }

    pub fn stage_name(&self, stage_id: &str) -> Option<&str> {
        self.stage(stage_id).map(|s| s.name.as_str())
    }

    /// Ordinary stages of a journey in ascending order, without the archive sentinel.
    pub fn stages_for(&self, journey_id: &str) -> Vec<&Stage> {
        let mut stages: Vec<&Stage> = self
            .stages
            .iter()
            .filter(|s| s.journey_id == journey_id && !is_archive_sentinel(&s.id))
            .collect();
        stages.sort_by_key(|s| s.order);
        stages
    }

    pub fn stage_with_order(&self, journey_id: &str, order: u32) -> Option<&Stage> {
        self.stages_for(journey_id)
            .into_iter()
            .find(|s| s.order == order)
    }

    pub fn first_stage(&self, journey_id: &str) -> Option<&Stage> {
        self.stages_for(journey_id).into_iter().next()
    }

    pub fn is_stage_of(&self, stage_id: &str, journey_id: &str) -> bool {
        !is_archive_sentinel(stage_id)
            && self
                .stage(stage_id)
                .is_some_and(|s| s.journey_id == journey_id)
    }

    /// Stage a freshly registered person starts in.
    pub fn intake_stage_id(&self, journey_id: &str) -> &'static str {
        if journey_id == NEW_CONVERT_JOURNEY_ID {
            NEW_CONVERT_INTAKE_STAGE_ID
        } else {
            DEFAULT_INTAKE_STAGE_ID
        }
    }

    /// Journey a restored person returns to: their own, or the default when
    /// theirs is missing from the catalog.
    pub fn resolve_journey_id<'a>(&'a self, journey_id: &'a str) -> &'a str {
        if self.journey(journey_id).is_some() {
            journey_id
        } else {
            DEFAULT_JOURNEY_ID
        }
    }
}

impl Default for JourneyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn is_archive_sentinel(stage_id: &str) -> bool {
    stage_id == ARCHIVED_STAGE_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_three_journeys() {
        let catalog = JourneyCatalog::standard();
        assert_eq!(catalog.journeys().len(), 3);
    }

    #[test]
    fn test_stage_orders_unique_and_ascending_per_journey() {
        let catalog = JourneyCatalog::standard();
        for journey in catalog.journeys() {
            let orders: Vec<u32> = catalog.stages_for(&journey.id).iter().map(|s| s.order).collect();
            assert!(!orders.is_empty());
            assert!(orders.windows(2).all(|w| w[0] < w[1]), "{}: {:?}", journey.id, orders);
            assert_eq!(orders[0], 1);
        }
    }

    #[test]
    fn test_sentinel_is_excluded_from_journey_stages() {
        let catalog = JourneyCatalog::standard();
        assert!(catalog
            .stages_for(NEW_CONVERT_JOURNEY_ID)
            .iter()
            .all(|s| s.id != ARCHIVED_STAGE_ID));
        assert_eq!(catalog.stage_order(ARCHIVED_STAGE_ID), Some(99));
        assert!(!catalog.is_stage_of(ARCHIVED_STAGE_ID, NEW_CONVERT_JOURNEY_ID));
    }

    #[test]
    fn test_intake_stage_per_journey() {
        let catalog = JourneyCatalog::standard();
        assert_eq!(catalog.intake_stage_id(NEW_CONVERT_JOURNEY_ID), "contato-inicial");
        assert_eq!(catalog.intake_stage_id(RECONCILIATION_JOURNEY_ID), "acolhimento-inicial");
        assert_eq!(catalog.intake_stage_id(REACTIVATION_JOURNEY_ID), "acolhimento-inicial");
    }

    #[test]
    fn test_first_stage_is_order_one() {
        let catalog = JourneyCatalog::standard();
        assert_eq!(catalog.first_stage(REACTIVATION_JOURNEY_ID).unwrap().id, "primeiro-contato");
        assert_eq!(catalog.first_stage("nope"), None);
    }

    #[test]
    fn test_unknown_journey_resolves_to_default() {
        let catalog = JourneyCatalog::standard();
        assert_eq!(catalog.resolve_journey_id(""), DEFAULT_JOURNEY_ID);
        assert_eq!(catalog.resolve_journey_id(REACTIVATION_JOURNEY_ID), REACTIVATION_JOURNEY_ID);
    }
}
