use serde_json::{Map, Value, json};

use crate::domain::plan::entities::WEEKDAYS;

fn meal_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "description": { "type": "string" },
            "calories": { "type": "integer", "minimum": 0 }
        },
        "required": ["description", "calories"]
    })
}

fn day_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "meals": {
                "type": "object",
                "properties": {
                    "breakfast": meal_schema(),
                    "lunch": meal_schema(),
                    "snack": meal_schema(),
                    "dinner": meal_schema()
                },
                "required": ["breakfast", "lunch", "snack", "dinner"]
            },
            "workout": {
                "type": "object",
                "properties": {
                    "description": { "type": "string" },
                    "duration_minutes": { "type": "integer", "minimum": 0 }
                },
                "required": ["description", "duration_minutes"]
            },
            "total_calories": { "type": "integer", "minimum": 0 }
        },
        "required": ["meals", "workout", "total_calories"]
    })
}

/// Returns the JSON schema for weekly plan LLM responses
pub fn get_weekly_plan_schema() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::with_capacity(WEEKDAYS.len() + 1);

    for weekday in WEEKDAYS {
        properties.insert(weekday.key().to_string(), day_plan_schema());
        required.push(Value::from(weekday.key()));
    }

    properties.insert(
        "shopping_list".to_string(),
        json!({
            "type": "array",
            "items": { "type": "string" }
        }),
    );
    required.push(Value::from("shopping_list"));

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_all_days_and_shopping_list() {
        let schema = get_weekly_plan_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(
            required,
            vec![
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
                "shopping_list"
            ]
        );
        assert_eq!(schema["properties"]["shopping_list"]["items"]["type"], "string");
    }

    #[test]
    fn test_day_schema_requires_four_meals() {
        let schema = get_weekly_plan_schema();
        let meals = &schema["properties"]["friday"]["properties"]["meals"];

        assert_eq!(meals["required"].as_array().unwrap().len(), 4);
        assert_eq!(
            meals["properties"]["snack"]["properties"]["calories"]["type"],
            "integer"
        );
    }
}
