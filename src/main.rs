use fatsecret::{authenticate, Credentials, FatsecretClient};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_result(label: &str, value: &Value) -> anyhow::Result<()> {
    println!("{}:", label);
    println!("{}\n", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Please set FATSECRET_CONSUMER_KEY and FATSECRET_CONSUMER_SECRET");
            std::process::exit(1);
        }
    };
    tracing::info!("Using consumer key: {}", credentials.consumer_key);

    let public = FatsecretClient::new(
        credentials.consumer_key.clone(),
        credentials.consumer_secret.clone(),
    )?;

    tracing::info!("---- No authentication required ----");
    print_result(
        "Food search results",
        &public.foods_search("Tacos", None, None, None, None).await?,
    )?;
    print_result("Food item 1345", &public.food_get("1345").await?)?;
    print_result(
        "Recipe search results",
        &public.recipes_search("Tomato Soup", None, None, None).await?,
    )?;
    print_result("Recipe 88339", &public.recipe_get("88339").await?)?;

    tracing::info!("---- Three-legged OAuth ----");
    let user = match authenticate(&credentials).await {
        Some(user) => {
            if let Some(token) = user.session_token() {
                println!("Session token: ({}, {})", token.token, token.secret);
                println!("Save these as FATSECRET_ACCESS_TOKEN and FATSECRET_ACCESS_SECRET for future use!\n");
            }
            user
        }
        None => {
            tracing::warn!("Authentication failed or credentials not provided.");
            tracing::warn!("Set FATSECRET_USERNAME and FATSECRET_PASSWORD,");
            tracing::warn!("or FATSECRET_ACCESS_TOKEN and FATSECRET_ACCESS_SECRET to reuse saved tokens.");
            tracing::info!("Continuing with the consumer-only client");
            public
        }
    };

    print_result(
        "Recipe search results",
        &user.recipes_search("Enchiladas", None, None, None).await?,
    )?;
    if user.is_authenticated() {
        print_result("Profile", &user.profile_get().await?)?;
    }

    Ok(())
}
