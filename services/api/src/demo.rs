use crate::infra::{build_category_averages, build_profile_store};
use chrono::{Local, Timelike};
use clap::Args;
use std::sync::Arc;
use upi_recommender::config::AppConfig;
use upi_recommender::error::AppError;
use upi_recommender::recommender::domain::{
    Category, RecommendationRequest, RecommendationResult, UserId,
};
use upi_recommender::recommender::insights::UserInsights;
use upi_recommender::recommender::scoring::ScoringEngine;
use upi_recommender::recommender::service::{RecommendationError, RecommendationService};

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// User identifier; omit to score as a new user
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Transaction category, e.g. "Food & Dining"
    #[arg(long)]
    pub(crate) category: String,
    /// Transaction location, carried for display only
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Payment method, carried for display only
    #[arg(long)]
    pub(crate) payment_method: Option<String>,
    /// Hour of day 0-23. Defaults to the current local hour.
    #[arg(long)]
    pub(crate) hour: Option<i32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the hour used for the scripted requests
    #[arg(long)]
    pub(crate) hour: Option<i32>,
    /// Skip the user-insight portion of the demo output
    #[arg(long)]
    pub(crate) skip_insights: bool,
}

fn build_service() -> Result<RecommendationService<crate::infra::InMemoryProfileStore>, AppError> {
    let config = AppConfig::load()?;
    let store = Arc::new(build_profile_store(&config.data)?);
    let averages = build_category_averages(&config.data)?;
    Ok(RecommendationService::new(
        store,
        averages,
        ScoringEngine::default(),
    ))
}

fn current_hour() -> i32 {
    Local::now().hour() as i32
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        user,
        category,
        location,
        payment_method,
        hour,
    } = args;

    let service = build_service()?;
    let request = RecommendationRequest {
        user_id: user.map(UserId),
        category: Category(category),
        location,
        payment_method,
        hour: hour.unwrap_or_else(current_hour),
    };

    let result = service.recommend(&request)?;
    render_recommendation(&request, &result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        hour,
        skip_insights,
    } = args;

    let service = build_service()?;

    println!("UPI amount recommendation demo");
    println!(
        "{} profiles | {} categories",
        service.profile_count(),
        service.category_averages().len()
    );

    let requests = [
        sample_request(Some("USER_0001"), "Food & Dining", "Mumbai", "PhonePe", 13),
        sample_request(Some("USER_0002"), "Transportation", "Delhi", "Google Pay", 8),
        sample_request(None, "Shopping", "Bangalore", "Paytm", 15),
    ];

    for mut request in requests {
        if let Some(hour) = hour {
            request.hour = hour;
        }
        match service.recommend(&request) {
            Ok(result) => {
                println!();
                render_recommendation(&request, &result);
                if !skip_insights {
                    render_insights_if_profiled(&service, &request);
                }
            }
            Err(error) => println!("\nrequest failed: {error}"),
        }
    }

    Ok(())
}

fn sample_request(
    user: Option<&str>,
    category: &str,
    location: &str,
    payment_method: &str,
    hour: i32,
) -> RecommendationRequest {
    RecommendationRequest {
        user_id: user.map(|id| UserId(id.to_string())),
        category: Category(category.to_string()),
        location: Some(location.to_string()),
        payment_method: Some(payment_method.to_string()),
        hour,
    }
}

fn render_recommendation(request: &RecommendationRequest, result: &RecommendationResult) {
    let user = request
        .effective_user_id()
        .map(|id| id.0.as_str())
        .unwrap_or("new user");
    println!("User: {user}");
    println!("Category: {}", request.category.0);
    if let Some(location) = &request.location {
        println!("Location: {location} at {:02}:00", request.hour.rem_euclid(24));
    }
    println!("Recommended amount: Rs {}", result.amount);
    println!("Confidence: {}%", result.confidence);
    println!("Segment: {}", result.cluster);
    println!("Reasoning: {}", result.reasoning);
}

fn render_insights_if_profiled(
    service: &RecommendationService<crate::infra::InMemoryProfileStore>,
    request: &RecommendationRequest,
) {
    let Some(user_id) = request.effective_user_id() else {
        return;
    };
    match service.user_insights(user_id) {
        Ok(insights) => render_insights(&insights),
        Err(RecommendationError::UnknownUser { .. }) => {}
        Err(error) => println!("insights unavailable: {error}"),
    }
}

fn render_insights(insights: &UserInsights) {
    println!(
        "Insights: avg Rs {:.2} over {} transactions | prefers {}",
        insights.spending_profile.avg_amount,
        insights.spending_profile.total_transactions,
        insights.spending_profile.preferred_category
    );
    if let Some(patterns) = &insights.behavior_patterns {
        println!(
            "Patterns: typically around {:.1}h | weekend activity {}",
            patterns.typical_hour, patterns.weekend_activity
        );
    }
    println!(
        "Segment: {} (cluster {})",
        insights.user_segment.cluster_name, insights.user_segment.cluster_id
    );
}
