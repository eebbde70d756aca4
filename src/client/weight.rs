use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{
    client::FatsecretClient,
    error::Result,
    types::{ApiParams, WeightUpdate},
};

impl FatsecretClient {
    /// Record a weigh-in. The height is only taken on the first weigh-in.
    pub async fn weight_update(&self, update: &WeightUpdate) -> Result<Value> {
        let mut params = ApiParams::new("weight.update");
        params
            .push("current_weight_kg", update.current_weight_kg)
            .push("weight_type", update.weight_type)
            .push("height_type", update.height_type)
            .push_opt("date", update.date.map(Self::unix_time))
            .push_opt("goal_weight_kg", update.goal_weight_kg)
            .push_opt("current_height_cm", update.current_height_cm)
            .push_opt("comment", update.comment.as_deref());
        self.call(params).await
    }

    /// Recorded weights for the month containing `date`.
    pub async fn weights_get_month(&self, date: Option<NaiveDate>) -> Result<Value> {
        let mut params = ApiParams::new("weights.get_month");
        params.push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }
}
