// Prompt constants for the next-best-action advisor.

pub const SUGGESTION_SYSTEM: &str =
    "Você é um assistente pastoral experiente. \
    Responda em português, com uma única frase curta. \
    Não inclua explicações, listas ou aspas.";

/// Replace every `{placeholder}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"Baseado nos dados de uma pessoa em acompanhamento na igreja, sugira a "próxima melhor ação" de forma concisa, clara e direta.

Dados da Pessoa:
- Nome: {name}
- Jornada Atual: "{journey}"
- Estágio Atual: "{stage}"
- Urgência: {urgency}
- Dias desde a decisão: {days_since_decision}
- Dias desde o último contato: {days_since_last_contact}
- Prazo para 1ª visita: {first_visit_due}

Responda APENAS com a ação sugerida. Exemplos:
"Realizar o 1º contato (Prazo de 48h expirando!)"
"Agendar 1ª visita até {visit_deadline}"
"Acompanhar andamento do Bloco 2 do Discipulado"
"Marcar entrevista pastoral (Discipulado concluído)"
"Realizar visita de reconciliação""#;
