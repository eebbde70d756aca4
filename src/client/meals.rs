//! Saved meal methods. A saved meal is a named group of foods that can be
//! copied into the food diary in one go.

use serde_json::Value;

use crate::client::{
    client::FatsecretClient,
    error::Result,
    types::{ApiParams, Meal},
};

impl FatsecretClient {
    /// Create a saved meal, optionally tagged with the meals it suits.
    pub async fn saved_meal_create(
        &self,
        meal_name: &str,
        meal_desc: Option<&str>,
        meals: &[Meal],
    ) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal.create");
        params
            .push("saved_meal_name", meal_name)
            .push_opt("saved_meal_description", meal_desc)
            .push_opt("meals", joined_meals(meals));
        self.call(params).await
    }

    pub async fn saved_meal_delete(&self, saved_meal_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal.delete");
        params.push("saved_meal_id", saved_meal_id);
        self.call(params).await
    }

    pub async fn saved_meal_edit(
        &self,
        saved_meal_id: &str,
        new_name: Option<&str>,
        meal_desc: Option<&str>,
        meals: &[Meal],
    ) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal.edit");
        params
            .push("saved_meal_id", saved_meal_id)
            .push_opt("saved_meal_name", new_name)
            .push_opt("saved_meal_description", meal_desc)
            .push_opt("meals", joined_meals(meals));
        self.call(params).await
    }

    /// Saved meals of the user, optionally only those suited to `meal`.
    pub async fn saved_meal_get(&self, meal: Option<Meal>) -> Result<Value> {
        let mut params = ApiParams::new("saved_meals.get");
        params.push_opt("meal", meal);
        self.call(params).await
    }

    pub async fn saved_meal_item_add(
        &self,
        saved_meal_id: &str,
        food_id: &str,
        food_entry_name: &str,
        serving_id: &str,
        number_of_units: f64,
    ) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal_item.add");
        params
            .push("saved_meal_id", saved_meal_id)
            .push("food_id", food_id)
            .push("food_entry_name", food_entry_name)
            .push("serving_id", serving_id)
            .push("number_of_units", number_of_units);
        self.call(params).await
    }

    pub async fn saved_meal_item_delete(&self, saved_meal_item_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal_item.delete");
        params.push("saved_meal_item_id", saved_meal_item_id);
        self.call(params).await
    }

    /// Rename an item or change its number of servings. The serving itself
    /// cannot be changed; delete and re-add the item instead.
    pub async fn saved_meal_item_edit(
        &self,
        saved_meal_item_id: &str,
        item_name: Option<&str>,
        number_of_units: Option<f64>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal_item.edit");
        params
            .push("saved_meal_item_id", saved_meal_item_id)
            .push_opt("saved_meal_item_name", item_name)
            .push_opt("number_of_units", number_of_units);
        self.call(params).await
    }

    pub async fn saved_meal_items_get(&self, saved_meal_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("saved_meal_items.get");
        params.push("saved_meal_id", saved_meal_id);
        self.call(params).await
    }
}

fn joined_meals(meals: &[Meal]) -> Option<String> {
    if meals.is_empty() {
        None
    } else {
        Some(Meal::join(meals))
    }
}
