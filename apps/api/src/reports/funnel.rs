use serde::Serialize;

use crate::journeys::JourneyCatalog;
use crate::models::journey::Journey;
use crate::models::person::Person;
use crate::reports::{percent, reached};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub stage_id: String,
    pub stage_name: String,
    /// People who reached this stage or any later one.
    pub count: usize,
    /// Share of the previous stage's count; the first stage is always 100.
    pub conversion: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyFunnel {
    pub journey_id: String,
    pub journey_name: String,
    pub stages: Vec<FunnelStage>,
}

/// Funnel for one journey, or `None` when nobody is in it.
pub fn journey_funnel(
    catalog: &JourneyCatalog,
    people: &[Person],
    journey: &Journey,
) -> Option<JourneyFunnel> {
    let in_journey: Vec<&Person> = people.iter().filter(|p| p.journey_id == journey.id).collect();
    if in_journey.is_empty() {
        return None;
    }

    let mut previous: Option<usize> = None;
    let mut stages = Vec::new();
    for stage in catalog.stages_for(&journey.id) {
        let count = in_journey
            .iter()
            .filter(|p| reached(catalog, p, stage.order))
            .count();
        let conversion = match previous {
            None => 100,
            Some(prev) => percent(count, prev),
        };
        previous = Some(count);

        if count > 0 {
            stages.push(FunnelStage {
                stage_id: stage.id.clone(),
                stage_name: stage.name.clone(),
                count,
                conversion,
            });
        }
    }

    Some(JourneyFunnel {
        journey_id: journey.id.clone(),
        journey_name: journey.name.clone(),
        stages,
    })
}

/// Funnels for every journey that has people.
pub fn funnel_analysis(catalog: &JourneyCatalog, people: &[Person]) -> Vec<JourneyFunnel> {
    catalog
        .journeys()
        .iter()
        .filter_map(|j| journey_funnel(catalog, people, j))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journeys::catalog::ARCHIVED_STAGE_ID;
    use crate::store::seed;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_new_convert_funnel() {
        let catalog = JourneyCatalog::standard();
        let funnels = funnel_analysis(&catalog, &seed::people());
        let nc = &funnels[0];
        assert_eq!(nc.journey_id, "novo-convertido");
        let counts: Vec<usize> = nc.stages.iter().map(|s| s.count).collect();
        let conversions: Vec<u32> = nc.stages.iter().map(|s| s.conversion).collect();
        // 5 people; orders 1, 2, 4, 99, 99.
        assert_eq!(counts, vec![5, 4, 3, 3, 2, 2]);
        assert_eq!(conversions, vec![100, 80, 75, 100, 67, 100]);
    }

    #[test]
    fn test_journey_without_people_is_omitted() {
        let catalog = JourneyCatalog::standard();
        let funnels = funnel_analysis(&catalog, &seed::people());
        let ids: Vec<&str> = funnels.iter().map(|f| f.journey_id.as_str()).collect();
        assert_eq!(ids, vec!["novo-convertido", "reconciliacao"]);
    }

    #[test]
    fn test_zero_count_stages_dropped() {
        let catalog = JourneyCatalog::standard();
        let mut people = seed::people();
        people.retain(|p| p.id == "person-3"); // reconciliation, first stage only
        let funnels = funnel_analysis(&catalog, &people);
        assert_eq!(funnels.len(), 1);
        assert_eq!(funnels[0].stages.len(), 1);
        assert_eq!(funnels[0].stages[0].conversion, 100);
    }

    fn any_stage() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "contato-inicial",
            "visita-acolhimento",
            "discipulado-1",
            "discipulado-2",
            "entrevista-pastoral",
            "integrado",
            ARCHIVED_STAGE_ID,
        ])
    }

    proptest! {
        /// Later stages only ever count a subset of those who reached earlier ones.
        #[test]
        fn funnel_counts_never_increase(stages in prop::collection::vec(any_stage(), 1..40)) {
            let catalog = JourneyCatalog::standard();
            let template = seed::people().remove(0);
            let people: Vec<Person> = stages
                .iter()
                .map(|s| Person { stage_id: s.to_string(), ..template.clone() })
                .collect();

            let funnel = journey_funnel(&catalog, &people, &catalog.journeys()[0]).unwrap();
            prop_assert_eq!(funnel.stages[0].count, people.len());
            for pair in funnel.stages.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
            for stage in &funnel.stages {
                prop_assert!(stage.conversion <= 100);
            }
        }
    }
}
