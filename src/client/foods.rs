//! Food search, favorites and food diary methods.

use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{
    client::FatsecretClient,
    error::Result,
    types::{ApiParams, Meal},
};

impl FatsecretClient {
    /// Add a food to the user's favorites. `serving_id` and
    /// `number_of_units` are only sent when both are given.
    pub async fn food_add_favorite(
        &self,
        food_id: &str,
        serving_id: Option<&str>,
        number_of_units: Option<f64>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food.add_favorite");
        params.push("food_id", food_id);
        push_serving(&mut params, serving_id, number_of_units);
        self.call(params).await
    }

    /// Remove a food from the user's favorites. Same pairing rule as
    /// [`food_add_favorite`](Self::food_add_favorite).
    pub async fn food_delete_favorite(
        &self,
        food_id: &str,
        serving_id: Option<&str>,
        number_of_units: Option<f64>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food.delete_favorite");
        params.push("food_id", food_id);
        push_serving(&mut params, serving_id, number_of_units);
        self.call(params).await
    }

    /// Detailed nutritional information for a food.
    pub async fn food_get(&self, food_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("food.get");
        params.push("food_id", food_id);
        self.call(params).await
    }

    pub async fn food_get_v2(
        &self,
        food_id: &str,
        region: Option<&str>,
        language: Option<&str>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food.get.v2");
        params
            .push("food_id", food_id)
            .push_opt("region", region)
            .push_opt("language", language);
        self.call(params).await
    }

    /// Look up the food id for a GTIN-13 barcode (13 digits, zero padded on
    /// the left; UPC-E must be expanded to UPC-A first).
    pub async fn food_find_id_for_barcode(
        &self,
        barcode: &str,
        region: Option<&str>,
        language: Option<&str>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food.find_id_for_barcode");
        params
            .push("barcode", barcode)
            .push_opt("region", region)
            .push_opt("language", language);
        self.call(params).await
    }

    pub async fn foods_get_favorites(&self) -> Result<Value> {
        self.call(ApiParams::new("foods.get_favorites")).await
    }

    pub async fn foods_get_most_eaten(&self, meal: Option<Meal>) -> Result<Value> {
        let mut params = ApiParams::new("foods.get_most_eaten");
        params.push_opt("meal", meal);
        self.call(params).await
    }

    pub async fn foods_get_recently_eaten(&self, meal: Option<Meal>) -> Result<Value> {
        let mut params = ApiParams::new("foods.get_recently_eaten");
        params.push_opt("meal", meal);
        self.call(params).await
    }

    /// Search the food database. Pages are zero-based, so page 4 with
    /// `max_results` 10 returns results 41-50. `page_number` and
    /// `max_results` are only sent together.
    pub async fn foods_search(
        &self,
        search_expression: &str,
        page_number: Option<u32>,
        max_results: Option<u32>,
        region: Option<&str>,
        language: Option<&str>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("foods.search");
        params.push("search_expression", search_expression);
        if let (Some(page), Some(max)) = (page_number, max_results) {
            params.push("page_number", page).push("max_results", max);
        }
        params.push_opt("region", region).push_opt("language", language);
        self.call(params).await
    }

    /// Suggestions for a partial expression, e.g. "chic".
    pub async fn foods_autocomplete(
        &self,
        expression: &str,
        max_results: Option<u32>,
        region: Option<&str>,
        language: Option<&str>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("foods.autocomplete");
        params
            .push("expression", expression)
            .push_opt("max_results", max_results)
            .push_opt("region", region)
            .push_opt("language", language);
        self.call(params).await
    }

    /// Copy the entries of one meal (or all meals) from one day to another.
    pub async fn food_entries_copy(
        &self,
        from_date: NaiveDate,
        to_date: NaiveDate,
        meal: Option<Meal>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food_entries.copy");
        params
            .push("from_date", Self::unix_time(from_date))
            .push("to_date", Self::unix_time(to_date))
            .push_opt("meal", meal);
        self.call(params).await
    }

    pub async fn food_entries_copy_saved_meal(
        &self,
        saved_meal_id: &str,
        meal: Meal,
        date: Option<NaiveDate>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food_entries.copy_saved_meal");
        params
            .push("saved_meal_id", saved_meal_id)
            .push("meal", meal)
            .push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    /// Diary entries for a single entry id or for a whole day. The id wins
    /// when both are given; with neither, no request is made and `None` is
    /// returned.
    pub async fn food_entries_get(
        &self,
        food_entry_id: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Option<Value>> {
        let mut params = ApiParams::new("food_entries.get");
        match (food_entry_id, date) {
            (Some(id), _) => params.push("food_entry_id", id),
            (None, Some(date)) => params.push("date", Self::unix_time(date)),
            (None, None) => {
                tracing::debug!("food_entries.get needs a food_entry_id or a date; skipping");
                return Ok(None);
            }
        };
        self.call(params).await.map(Some)
    }

    pub async fn food_entries_get_month(&self, date: Option<NaiveDate>) -> Result<Value> {
        let mut params = ApiParams::new("food_entries.get_month");
        params.push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    pub async fn food_entry_create(
        &self,
        food_id: &str,
        food_entry_name: &str,
        serving_id: &str,
        number_of_units: f64,
        meal: Meal,
        date: Option<NaiveDate>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food_entry.create");
        params
            .push("food_id", food_id)
            .push("food_entry_name", food_entry_name)
            .push("serving_id", serving_id)
            .push("number_of_units", number_of_units)
            .push("meal", meal)
            .push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    pub async fn food_entry_delete(&self, food_entry_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("food_entry.delete");
        params.push("food_entry_id", food_entry_id);
        self.call(params).await
    }

    /// Adjust a diary entry. The date cannot be changed; delete and recreate
    /// the entry instead.
    pub async fn food_entry_edit(
        &self,
        food_entry_id: &str,
        entry_name: Option<&str>,
        serving_id: Option<&str>,
        number_of_units: Option<f64>,
        meal: Option<Meal>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("food_entry.edit");
        params
            .push("food_entry_id", food_entry_id)
            .push_opt("food_entry_name", entry_name)
            .push_opt("serving_id", serving_id)
            .push_opt("number_of_units", number_of_units)
            .push_opt("meal", meal);
        self.call(params).await
    }
}

fn push_serving(params: &mut ApiParams, serving_id: Option<&str>, number_of_units: Option<f64>) {
    if let (Some(serving_id), Some(units)) = (serving_id, number_of_units) {
        params
            .push("serving_id", serving_id)
            .push("number_of_units", units);
    }
}
