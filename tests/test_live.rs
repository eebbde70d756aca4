//! Smoke tests against the real FatSecret API.
//!
//! Run with `cargo test --test test_live -- --ignored` after setting
//! `FATSECRET_CONSUMER_KEY` and `FATSECRET_CONSUMER_SECRET` (plus
//! `FATSECRET_USERNAME` / `FATSECRET_PASSWORD` or a saved access token pair
//! for the user tests).

use fatsecret::{authenticate, Credentials, FatsecretClient};
use serial_test::serial;

fn credentials() -> Credentials {
    Credentials::from_env().expect("FATSECRET_CONSUMER_KEY and FATSECRET_CONSUMER_SECRET must be set")
}

/// Authenticated client when possible, consumer-only otherwise.
async fn live_client() -> FatsecretClient {
    let credentials = credentials();
    match authenticate(&credentials).await {
        Some(client) => client,
        None => {
            println!("Failed to authenticate with username/password; using consumer-only client.");
            FatsecretClient::new(credentials.consumer_key, credentials.consumer_secret)
                .expect("Failed to build client")
        }
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires FatSecret API credentials"]
async fn test_food_get_basic() {
    let client = live_client().await;
    let result = client.food_get("4380").await.expect("food.get should succeed");

    let food = &result["food"];
    assert_eq!(food["food_id"], "4380");
    assert!(food.get("food_name").is_some());
}

#[tokio::test]
#[serial]
#[ignore = "requires FatSecret user credentials"]
async fn test_profile_get() {
    let client = live_client().await;
    assert!(client.is_authenticated(), "Set FATSECRET_USERNAME/PASSWORD or an access token pair");

    let profile = client.profile_get().await.expect("profile.get should succeed");
    assert!(profile.get("profile").is_some());
}
