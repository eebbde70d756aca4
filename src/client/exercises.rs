//! Exercise diary methods.
//!
//! A user's exercise diary always holds 24 hours worth of activities per day,
//! so edits move time from one activity to another rather than adding or
//! removing entries.

use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{
    client::FatsecretClient,
    error::Result,
    types::{ApiParams, ExerciseEntryEdit},
};

/// Exercise type id of the custom "Other" activity.
const OTHER_EXERCISE_ID: i64 = 0;

impl FatsecretClient {
    /// All exercise types and their ids.
    pub async fn exercises_get(&self) -> Result<Value> {
        self.call(ApiParams::new("exercises.get")).await
    }

    /// Save the default (template) entries for a day as real entries.
    pub async fn exercise_entries_commit_day(&self, date: Option<NaiveDate>) -> Result<Value> {
        let mut params = ApiParams::new("exercise_entries.commit_day");
        params.push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    pub async fn exercise_entries_get(&self, date: Option<NaiveDate>) -> Result<Value> {
        let mut params = ApiParams::new("exercise_entries.get");
        params.push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    /// Estimated calories expended per day for the month containing `date`.
    pub async fn exercise_entries_get_month(&self, date: Option<NaiveDate>) -> Result<Value> {
        let mut params = ApiParams::new("exercise_entries.get_month");
        params.push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    /// Save a day's entries as the template for the given weekdays.
    ///
    /// `days` is a bit set with Sunday as the lowest bit, so Tuesday and
    /// Thursday are `0b0001_0100`.
    pub async fn exercise_entries_save_template(
        &self,
        days: u8,
        date: Option<NaiveDate>,
    ) -> Result<Value> {
        let mut params = ApiParams::new("exercise_entries.save_template");
        params
            .push("days", days)
            .push_opt("date", date.map(Self::unix_time));
        self.call(params).await
    }

    /// Shift minutes between two activities.
    ///
    /// Shifting to the "Other" type (id 0) needs `shift_to_name`, or failing
    /// that `kcals`; shifting from it needs `shift_from_name`. When those are
    /// missing no request is made and `None` is returned.
    pub async fn exercise_entry_edit(&self, edit: &ExerciseEntryEdit) -> Result<Option<Value>> {
        match exercise_edit_params(edit) {
            Some(params) => self.call(params).await.map(Some),
            None => {
                tracing::debug!("Incomplete exercise_entry.edit for \"Other\" exercise; skipping");
                Ok(None)
            }
        }
    }
}

fn exercise_edit_params(edit: &ExerciseEntryEdit) -> Option<ApiParams> {
    let mut params = ApiParams::new("exercise_entry.edit");
    params
        .push("shift_to_id", edit.shift_to_id)
        .push("shift_from_id", edit.shift_from_id)
        .push("minutes", edit.minutes)
        .push_opt("date", edit.date.map(FatsecretClient::unix_time));

    if edit.shift_to_id == OTHER_EXERCISE_ID {
        match (&edit.shift_to_name, edit.kcals) {
            (Some(name), _) => params.push("shift_to_name", name),
            (None, Some(kcals)) => params.push("kcals", kcals),
            (None, None) => return None,
        };
    }
    if edit.shift_from_id == OTHER_EXERCISE_ID {
        params.push("shift_from_name", edit.shift_from_name.as_ref()?);
    }
    Some(params)
}
