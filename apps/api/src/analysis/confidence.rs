//! Confidence scoring: structurally-derived measures of how much evidence
//! the model surfaced to support the trust score. Not a measure of accuracy.
//!
//! Each sub-score is a weighted sum of presence signals in `[0, 1]`; with no
//! signals present the score is 0. The mean of the four, rescaled to
//! `[0, 100]`, becomes `analysisMetadata.confidenceScore`.

use crate::analysis::models::{
    CommunityInsights, CompanyVerification, JobPostingAnalysis, TechnicalValidation,
};

/// Weighted presence of company-identity evidence:
/// 0.3 LinkedIn, 0.2 Crunchbase, 0.2 secure website, 0.3 official presence.
pub fn company_verification_confidence(cv: &CompanyVerification) -> f64 {
    let mut score = 0.0;
    if cv.linked_in_data.exists {
        score += 0.3;
    }
    if cv.crunchbase_data.exists {
        score += 0.2;
    }
    if cv.domain_analysis.has_secure_website {
        score += 0.2;
    }
    if !cv.official_presence.platforms.is_empty() {
        score += 0.3;
    }
    score
}

/// 0.25 each: consistent requirements, consistent salary, listings on at
/// least two platforms, at least one salary data source.
pub fn job_posting_confidence(jp: &JobPostingAnalysis) -> f64 {
    let mut score = 0.0;
    if jp.consistency_analysis.requirements_consistent {
        score += 0.25;
    }
    if jp.consistency_analysis.salary_range_consistent {
        score += 0.25;
    }
    if jp.cross_platform_presence.len() >= 2 {
        score += 0.25;
    }
    if !jp.market_alignment.salary_analysis.sources.is_empty() {
        score += 0.25;
    }
    score
}

/// Measures signal presence, not sentiment: identified red flags RAISE this
/// score because they are evidence the model found community discussion to
/// analyze. Known quirk; keep unless the contract changes.
pub fn community_insights_confidence(ci: &CommunityInsights) -> f64 {
    let mut score = 0.0;
    if ci.employee_reviews.total_reviews >= 1 {
        score += 0.4;
    }
    if !ci.platform_feedback.is_empty() {
        score += 0.3;
    }
    if !ci.red_flags.identified.is_empty() {
        score += 0.3;
    }
    score
}

/// 0.25 each: SPF record, valid DKIM, SSL, and (valid email format AND valid
/// phone) as one combined condition.
pub fn technical_validation_confidence(tv: &TechnicalValidation) -> f64 {
    let mut score = 0.0;
    if tv.domain_analysis.spf_record {
        score += 0.25;
    }
    if tv.domain_analysis.dkim_valid {
        score += 0.25;
    }
    if tv.domain_analysis.website_ssl {
        score += 0.25;
    }
    if tv.contact_validation.email_format.eq_ignore_ascii_case("valid")
        && tv.contact_validation.phone_number_valid
    {
        score += 0.25;
    }
    score
}

/// Mean of the four sub-scores, rescaled to `[0, 100]`.
pub fn overall_confidence(
    cv: &CompanyVerification,
    jp: &JobPostingAnalysis,
    ci: &CommunityInsights,
    tv: &TechnicalValidation,
) -> u32 {
    let mean = (company_verification_confidence(cv)
        + job_posting_confidence(jp)
        + community_insights_confidence(ci)
        + technical_validation_confidence(tv))
        / 4.0;
    (mean.clamp(0.0, 1.0) * 100.0).round() as u32
}
