use serde::Serialize;

use crate::journeys::JourneyCatalog;
use crate::models::person::Person;
use crate::models::user::User;

const UNKNOWN_STAGE: &str = "Desconhecido";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderPerformance {
    pub leader_id: String,
    pub leader_name: String,
    /// Active people the leader is responsible for.
    pub total: usize,
    /// Largest stage first; ties keep first-seen order.
    pub by_stage: Vec<StageCount>,
}

pub fn leader_performance(
    catalog: &JourneyCatalog,
    people: &[Person],
    users: &[User],
) -> Vec<LeaderPerformance> {
    users
        .iter()
        .filter(|u| u.role.takes_responsibility())
        .map(|leader| {
            let assigned: Vec<&Person> = people
                .iter()
                .filter(|p| p.responsible_id == leader.id && !p.is_archived)
                .collect();

            let mut by_stage: Vec<StageCount> = Vec::new();
            for person in &assigned {
                let name = catalog.stage_name(&person.stage_id).unwrap_or(UNKNOWN_STAGE);
                match by_stage.iter_mut().find(|s| s.stage_name == name) {
                    Some(entry) => entry.count += 1,
                    None => by_stage.push(StageCount {
                        stage_name: name.to_string(),
                        count: 1,
                    }),
                }
            }
            by_stage.sort_by(|a, b| b.count.cmp(&a.count));

            LeaderPerformance {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                total: assigned.len(),
                by_stage,
            }
        })
        .collect()
}
