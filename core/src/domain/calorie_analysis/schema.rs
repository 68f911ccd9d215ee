use serde_json::json;

/// Returns the JSON schema for calorie analysis LLM responses
pub fn get_calorie_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dish_name": {
                "type": "string",
                "description": "Nome ou breve descrição do prato na imagem."
            },
            "total_calories": {
                "type": "integer",
                "minimum": 0,
                "description": "Estimativa do total de calorias do prato."
            },
            "analysis": {
                "type": "string",
                "description": "Breve análise nutricional dos componentes do prato."
            }
        },
        "required": ["dish_name", "total_calories", "analysis"]
    })
}
