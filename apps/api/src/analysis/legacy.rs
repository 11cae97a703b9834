//! Legacy projection views: the flatter shapes older clients expect,
//! computed purely from the already-normalized analysis branches. No model
//! calls, no raw-payload access.

use crate::analysis::dates::bucket_posting_age;
use crate::analysis::extract::{NOT_AVAILABLE, NOT_LISTED, NOT_SPECIFIED};
use crate::analysis::models::*;

pub fn project_reposting_history(jp: &JobPostingAnalysis, query: &JobQuery) -> RepostingHistory {
    let listings = &jp.cross_platform_presence;
    let summary = match listings.len() {
        0 => "No cross-platform listings were found for this posting".to_string(),
        1 => "This posting was found on 1 platform".to_string(),
        n => format!("This posting was found on {n} platforms"),
    };
    RepostingHistory {
        summary,
        explanation: jp.reposting_patterns.frequency.clone(),
        sources: listings
            .iter()
            .map(|listing| RepostingSource {
                platform: listing.platform.clone(),
                url: listing.url.clone(),
                title: format!("{} at {}", query.job_title, query.company_name),
                date: listing.post_date.clone(),
            })
            .collect(),
    }
}

pub fn project_community_sentiment(ci: &CommunityInsights) -> CommunitySentiment {
    CommunitySentiment {
        summary: ci.overall_sentiment.summary.clone(),
        reddit_analysis: platform_discussions(ci, "reddit"),
        blind_analysis: platform_discussions(ci, "blind"),
        glassdoor_analysis: glassdoor_reviews(ci),
    }
}

/// Flat-maps discussion threads for feedback entries whose platform name
/// matches (case-insensitive). Thread sentiment is keyword-derived from the
/// summary text; anything not explicitly positive reads as neutral.
fn platform_discussions(ci: &CommunityInsights, platform: &str) -> Vec<SentimentEntry> {
    ci.platform_feedback
        .iter()
        .filter(|feedback| feedback.platform.to_lowercase().contains(platform))
        .flat_map(|feedback| feedback.recent_discussions.iter())
        .map(|discussion| SentimentEntry {
            sentiment: if discussion.summary.to_lowercase().contains("positive") {
                "positive".to_string()
            } else {
                "neutral".to_string()
            },
            quote: discussion.key_quotes.first().cloned().unwrap_or_default(),
            url: discussion.url.clone(),
            date: discussion.date.clone(),
        })
        .collect()
}

/// The historical projection surfaced only the pros text, silently dropping
/// cons. Reviews now carry both so negative signal is not lost.
fn glassdoor_reviews(ci: &CommunityInsights) -> Vec<GlassdoorReview> {
    ci.employee_reviews
        .sources
        .iter()
        .filter(|source| source.platform.to_lowercase().contains("glassdoor"))
        .flat_map(|source| source.recent_reviews.iter())
        .map(|review| GlassdoorReview {
            rating: review.rating,
            review: review_text(review),
            url: "#".to_string(),
            date: review.date.clone(),
        })
        .collect()
}

fn review_text(review: &EmployeeReview) -> String {
    match (review.pros.is_empty(), review.cons.is_empty()) {
        (false, false) => format!("Pros: {} Cons: {}", review.pros, review.cons),
        (false, true) => review.pros.clone(),
        (true, false) => format!("Cons: {}", review.cons),
        (true, true) => String::new(),
    }
}

pub fn project_job_details(jp: &JobPostingAnalysis, query: &JobQuery) -> JobDetails {
    let listings = &jp.cross_platform_presence;
    let skills = &jp.market_alignment.skills_analysis;
    let salary_analysis = &jp.market_alignment.salary_analysis;
    JobDetails {
        realistic_requirements: skills.unusual_requirements.is_empty(),
        salary_provided: listings.iter().any(|l| l.salary != NOT_LISTED),
        posting_age: listings
            .first()
            .map(|l| bucket_posting_age(&l.post_date))
            .unwrap_or_else(|| "Unknown".to_string()),
        reposted_times: listings.len() as u32,
        consistency_across_sites: jp.consistency_analysis.requirements_consistent,
        requirements: RequirementsDetail {
            analysis: requirements_analysis(skills),
        },
        salary: SalaryDetail {
            range: salary_analysis.range.clone(),
            currency: NOT_SPECIFIED.to_string(),
            source: salary_analysis
                .sources
                .first()
                .map(|s| s.platform.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        },
        cross_platform_comparison: listings
            .iter()
            .map(|listing| ComparisonListing {
                platform: listing.platform.clone(),
                url: listing.url.clone(),
                title: format!("{} at {}", query.job_title, query.company_name),
                requirements: listing.requirements.clone(),
                salary: listing.salary.clone(),
                date: listing.post_date.clone(),
            })
            .collect(),
        explanation: jp.consistency_analysis.inconsistencies.join(". "),
    }
}

fn requirements_analysis(skills: &SkillsAnalysis) -> String {
    if skills.unusual_requirements.is_empty() {
        "Listed requirements appear consistent with market expectations.".to_string()
    } else {
        format!(
            "Unusual requirements identified: {}",
            skills.unusual_requirements.join(", ")
        )
    }
}

/// Index of every external source the analysis drew on, grouped by concern.
pub fn project_data_sources(
    cv: &CompanyVerification,
    jp: &JobPostingAnalysis,
    ci: &CommunityInsights,
) -> DataSources {
    DataSources {
        company_info: cv
            .official_presence
            .platforms
            .iter()
            .map(|p| CompanyInfoSource {
                source: p.name.clone(),
                url: p.url.clone(),
                last_updated: p.last_activity.clone(),
            })
            .collect(),
        job_posting_info: jp
            .cross_platform_presence
            .iter()
            .map(|l| JobPostingSource {
                platform: l.platform.clone(),
                url: l.url.clone(),
                post_date: l.post_date.clone(),
            })
            .collect(),
        market_data: jp
            .market_alignment
            .salary_analysis
            .sources
            .iter()
            .map(|s| MarketDataPoint {
                source: s.platform.clone(),
                data_point: s.data_point.clone(),
                date: s.date.clone(),
            })
            .collect(),
        community_feedback: ci
            .employee_reviews
            .sources
            .iter()
            .map(|s| CommunityFeedbackSource {
                platform: s.platform.clone(),
                review_count: s.review_count,
                last_updated: s
                    .recent_reviews
                    .first()
                    .map(|r| r.date.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            })
            .collect(),
    }
}
