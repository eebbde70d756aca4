use serde_json::Value;

use crate::client::{client::FatsecretClient, error::Result, types::ApiParams};

impl FatsecretClient {
    pub async fn recipes_add_favorite(&self, recipe_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("recipes.add_favorites");
        params.push("recipe_id", recipe_id);
        self.call(params).await
    }

    pub async fn recipes_delete_favorite(&self, recipe_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("recipes.delete_favorites");
        params.push("recipe_id", recipe_id);
        self.call(params).await
    }

    pub async fn recipe_get(&self, recipe_id: &str) -> Result<Value> {
        let mut params = ApiParams::new("recipe.get");
        params.push("recipe_id", recipe_id);
        self.call(params).await
    }

    pub async fn recipes_get_favorites(&self) -> Result<Value> {
        self.call(ApiParams::new("recipes.get_favorites")).await
    }

    /// Search recipes, optionally narrowed to one recipe type. Paging works
    /// like [`foods_search`](Self::foods_search).
    pub async fn recipes_search(
        &self,
        search_expression: &str,
        recipe_type: Option<&str>,
        page_number: Option<u32>,
        max_results: Option<u32>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("recipes.search");
        params
            .push("search_expression", search_expression)
            .push_opt("recipe_type", recipe_type);
        if let (Some(page), Some(max)) = (page_number, max_results) {
            params.push("page_number", page).push("max_results", max);
        }
        self.call(params).await
    }

    /// Every supported recipe type name.
    pub async fn recipe_types_get(&self) -> Result<Value> {
        self.call(ApiParams::new("recipe_types.get")).await
    }
}
