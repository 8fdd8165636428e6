//! CSV rendering for the report cards and the journey people table.
//!
//! Output is UTF-8 with a leading BOM, comma-delimited, every field quoted with
//! embedded quotes doubled, and rows joined by `\n` without a trailing newline.

use crate::journeys::JourneyCatalog;
use crate::models::person::Person;
use crate::models::user::User;
use crate::reports::archive_reasons::ReasonCount;
use crate::reports::completion::CompletionTime;
use crate::reports::conversion::ConversionRate;
use crate::reports::funnel::JourneyFunnel;
use crate::reports::leaders::LeaderPerformance;
use crate::reports::monthly::{month_label, MonthlyRow};

const BOM: char = '\u{FEFF}';
const NOT_AVAILABLE: &str = "N/A";

/// A named CSV document ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvExport {
    fn new(filename: impl Into<String>, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            filename: format!("{}.csv", filename.into()),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// The body as served, BOM included.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push(BOM);
        out.push_str(&join_row(&self.headers));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&join_row(row));
        }
        out
    }
}

fn join_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

pub fn conversion_csv(rate: &ConversionRate) -> CsvExport {
    CsvExport::new(
        "relatorio_taxa_conversao",
        &["Métrica", "Valor"],
        vec![
            vec![
                "Total de Pessoas na Jornada (Novo Convertido)".to_string(),
                rate.total.to_string(),
            ],
            vec![
                "Pessoas que chegaram na 1ª Visita ou posterior".to_string(),
                rate.converted.to_string(),
            ],
            vec!["Taxa de Conversão (%)".to_string(), rate.rate.to_string()],
        ],
    )
}

pub fn completion_csv(times: &[CompletionTime]) -> CsvExport {
    CsvExport::new(
        "relatorio_tempo_integracao",
        &["Jornada", "Tempo Médio (dias)", "Total de Pessoas Integradas"],
        times
            .iter()
            .map(|t| {
                vec![
                    t.journey_name.clone(),
                    t.avg_days.to_string(),
                    t.completed_count.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn monthly_csv(rows: &[MonthlyRow]) -> CsvExport {
    CsvExport::new(
        "relatorio_visao_mensal",
        &["Mês/Ano", "Novas Pessoas", "Integradas", "Arquivadas (Total)"],
        rows.iter()
            .map(|r| {
                vec![
                    month_label(&r.month),
                    r.new.to_string(),
                    r.integrated.to_string(),
                    r.archived.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn funnel_csv(funnels: &[JourneyFunnel]) -> CsvExport {
    CsvExport::new(
        "relatorio_funil_jornada",
        &[
            "Jornada",
            "Estágio",
            "Pessoas no Estágio",
            "Conversão do Estágio Anterior (%)",
        ],
        funnels
            .iter()
            .flat_map(|f| {
                f.stages.iter().map(move |s| {
                    vec![
                        f.journey_name.clone(),
                        s.stage_name.clone(),
                        s.count.to_string(),
                        s.conversion.to_string(),
                    ]
                })
            })
            .collect(),
    )
}

pub fn archive_reasons_csv(reasons: &[ReasonCount]) -> CsvExport {
    CsvExport::new(
        "relatorio_motivos_arquivamento",
        &["Motivo de Arquivamento", "Quantidade"],
        reasons
            .iter()
            .map(|r| vec![r.reason.label().to_string(), r.count.to_string()])
            .collect(),
    )
}

pub fn leader_csv(leader: &LeaderPerformance) -> CsvExport {
    CsvExport::new(
        format!("relatorio_lider_{}", slug(&leader.leader_name)),
        &["Estágio", "Quantidade"],
        leader
            .by_stage
            .iter()
            .map(|s| vec![s.stage_name.clone(), s.count.to_string()])
            .collect(),
    )
}

/// The journey table export: one row per person, archived included.
pub fn people_csv(
    journey_name: &str,
    people: &[Person],
    users: &[User],
    catalog: &JourneyCatalog,
) -> CsvExport {
    CsvExport::new(
        format!("relatorio_{}", slug(journey_name)),
        &[
            "Nome",
            "Responsável",
            "Estágio",
            "Urgência",
            "Data da Decisão",
            "Telefone",
            "Endereço",
            "Arquivado",
        ],
        people
            .iter()
            .map(|p| {
                let responsible = users
                    .iter()
                    .find(|u| u.id == p.responsible_id)
                    .map_or(NOT_AVAILABLE, |u| u.name.as_str());
                let stage = catalog.stage_name(&p.stage_id).unwrap_or(NOT_AVAILABLE);
                vec![
                    p.name.clone(),
                    responsible.to_string(),
                    stage.to_string(),
                    p.urgency.label().to_string(),
                    p.decision_date.format("%d/%m/%Y").to_string(),
                    p.phone.clone(),
                    p.address.clone(),
                    if p.is_archived { "Sim" } else { "Não" }.to_string(),
                ]
            })
            .collect(),
    )
}

fn slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::PeopleFilter;
    use crate::reports::compute_reports;
    use crate::store::{seed, TrackerStore};

    #[test]
    fn test_body_starts_with_bom_and_quotes_everything() {
        let export = CsvExport::new("x", &["A", "B"], vec![vec!["1".into(), "diz \"oi\"".into()]]);
        let body = export.render();
        assert!(body.starts_with('\u{FEFF}'));
        assert_eq!(
            body.trim_start_matches('\u{FEFF}'),
            "\"A\",\"B\"\n\"1\",\"diz \"\"oi\"\"\""
        );
        assert_eq!(export.filename, "x.csv");
    }

    #[test]
    fn test_people_export_has_header_plus_one_line_per_person() {
        let store = TrackerStore::seeded();
        let people = store.list_people(&PeopleFilter {
            journey_id: Some("novo-convertido".to_string()),
            ..Default::default()
        });
        let export = people_csv("Jornada Novo Convertido", &people, &store.users(), store.catalog());
        let body = export.render();
        let lines: Vec<&str> = body.split('\n').collect();

        assert_eq!(lines.len(), people.len() + 1);
        assert_eq!(export.filename, "relatorio_jornada_novo_convertido.csv");
        for (line, person) in lines[1..].iter().zip(&people) {
            let urgency_field = format!(",\"{}\",", person.urgency.label());
            assert!(line.contains(&urgency_field), "{line}");
        }
    }

    #[test]
    fn test_people_export_formats_decision_date_and_archive_flag() {
        let store = TrackerStore::seeded();
        let people = vec![store.person("person-5").unwrap()];
        let body = people_csv("J", &people, &store.users(), store.catalog()).render();
        let row = body.split('\n').nth(1).unwrap();
        assert!(row.starts_with("\"Eduarda Lima\",\"Maria Oliveira\",\"Arquivado\",\"Baixa\",\"15/03/2024\""));
        assert!(row.ends_with(",\"Sim\""));
    }

    #[test]
    fn test_funnel_export_rows() {
        let data = seed::tracker_data();
        let catalog = JourneyCatalog::standard();
        let bundle = compute_reports(&catalog, &data.people, &data.activity, &data.users);
        let export = funnel_csv(&bundle.funnel);
        let stage_rows: usize = bundle.funnel.iter().map(|f| f.stages.len()).sum();
        assert_eq!(export.rows.len(), stage_rows);
        assert_eq!(export.rows[0][3], "100");
    }

    #[test]
    fn test_monthly_export_uses_month_names() {
        let data = seed::tracker_data();
        let catalog = JourneyCatalog::standard();
        let bundle = compute_reports(&catalog, &data.people, &data.activity, &data.users);
        let export = monthly_csv(&bundle.monthly);
        assert_eq!(export.rows[0][0], "Julho/2024");
    }
}
