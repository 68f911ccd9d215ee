use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// The seven plan days in order; also the required keys of the plan schema.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Key used for this day in the response JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            Weekday::Monday => "Segunda-feira",
            Weekday::Tuesday => "Terça-feira",
            Weekday::Wednesday => "Quarta-feira",
            Weekday::Thursday => "Quinta-feira",
            Weekday::Friday => "Sexta-feira",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    pub description: String,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Meals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub snack: Meal,
    pub dinner: Meal,
}

impl Meals {
    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        [&self.breakfast, &self.lunch, &self.snack, &self.dinner].into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Workout {
    pub description: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayPlan {
    pub meals: Meals,
    pub workout: Workout,
    /// Model-reported total; advisory, may differ from the meal sum.
    pub total_calories: u32,
}

impl DayPlan {
    pub fn meal_calories(&self) -> u32 {
        self.meals
            .iter()
            .fold(0u32, |sum, meal| sum.saturating_add(meal.calories))
    }

    /// Reported total minus the meal sum.
    pub fn calorie_discrepancy(&self) -> i64 {
        i64::from(self.total_calories) - i64::from(self.meal_calories())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
    pub shopping_list: Vec<String>,
}

impl WeeklyPlan {
    pub fn day(&self, weekday: Weekday) -> &DayPlan {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        WEEKDAYS.into_iter().map(move |weekday| (weekday, self.day(weekday)))
    }

    pub fn weekly_calories(&self) -> u64 {
        self.days()
            .map(|(_, day)| u64::from(day.total_calories))
            .sum()
    }
}
