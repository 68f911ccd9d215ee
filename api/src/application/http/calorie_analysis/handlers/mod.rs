pub mod analyze_meal_image;
