use crate::domain::plan::prompts::RESPONSE_LOCALE;

pub fn build_analysis_prompt() -> String {
    format!(
        "Analisa a fotografia de comida em anexo.
Identifica o prato e os seus ingredientes principais.
Estima, de forma realista, o total de calorias da porção apresentada.
Acrescenta uma breve análise nutricional.
Escreve em {locale} e responde apenas com JSON válido que siga o schema fornecido, sem qualquer texto adicional.",
        locale = RESPONSE_LOCALE
    )
}
