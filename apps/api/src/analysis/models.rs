//! Typed response contract for a job posting analysis.
//!
//! Wire names are camelCase to match the historical client contract.
//! Invariant enforced by the normalizer: every field below is always present
//! with a concrete value of its declared type (no nulls, no missing leaves)
//! regardless of how partial the upstream model's output was. Trust and
//! sentiment scores are integers in `[0, 100]` in this form.

use serde::{Deserialize, Serialize};

/// Validated request input. Exists for the duration of one request cycle.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub job_title: String,
    pub company_name: String,
    pub job_link: Option<String>,
    pub location: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysisResult {
    /// Overall legitimacy estimate, rescaled from the model's 0.0–1.0.
    pub trust_score: u32,
    pub reasoning: String,
    pub job_title: String,
    pub company_name: String,
    pub company_verification: CompanyVerification,
    pub job_posting_analysis: JobPostingAnalysis,
    pub community_insights: CommunityInsights,
    pub technical_validation: TechnicalValidation,
    pub citations: Vec<Citation>,
    pub analysis_metadata: AnalysisMetadata,
    pub reposting_history: RepostingHistory,
    pub community_sentiment: CommunitySentiment,
    pub job_details: JobDetails,
    pub data_sources: DataSources,
}

// ────────────────────────────────────────────────────────────────────────────
// Company verification branch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyVerification {
    pub summary: String,
    pub linked_in_data: LinkedInData,
    pub crunchbase_data: CrunchbaseData,
    pub domain_analysis: CompanyDomainAnalysis,
    pub official_presence: OfficialPresence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInData {
    pub exists: bool,
    pub url: String,
    pub employee_count: u32,
    pub industry: String,
    pub founded_year: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrunchbaseData {
    pub exists: bool,
    pub funding_status: String,
    pub total_funding: String,
    pub last_funding_date: String,
    pub investors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDomainAnalysis {
    pub website_age: String,
    pub email_domain_valid: bool,
    pub has_secure_website: bool,
    pub has_career_page: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialPresence {
    pub platforms: Vec<PresencePlatform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePlatform {
    pub name: String,
    pub url: String,
    pub verified: bool,
    pub followers: u32,
    pub last_activity: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Job posting analysis branch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingAnalysis {
    pub cross_platform_presence: Vec<CrossPlatformListing>,
    pub consistency_analysis: ConsistencyAnalysis,
    pub reposting_patterns: RepostingPatterns,
    pub market_alignment: MarketAlignment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPlatformListing {
    pub platform: String,
    pub url: String,
    pub post_date: String,
    /// "Not listed" when the listing carries no salary data; the legacy
    /// `jobDetails.salaryProvided` projection compares against that literal.
    pub salary: String,
    pub requirements: Vec<String>,
    pub application_method: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyAnalysis {
    pub requirements_consistent: bool,
    pub salary_range_consistent: bool,
    pub contact_method_consistent: bool,
    pub description_similarity: f64,
    pub inconsistencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostingPatterns {
    pub frequency: String,
    pub platforms: Vec<String>,
    pub variations: Vec<String>,
    pub suspicious_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAlignment {
    pub salary_analysis: SalaryAnalysis,
    pub skills_analysis: SkillsAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAnalysis {
    pub range: String,
    pub market_comparison: String,
    pub sources: Vec<SalaryDataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryDataPoint {
    pub platform: String,
    pub data_point: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsAnalysis {
    pub required_skills: Vec<String>,
    pub market_demand: String,
    pub unusual_requirements: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Community insights branch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityInsights {
    pub overall_sentiment: OverallSentiment,
    pub platform_feedback: Vec<PlatformFeedback>,
    pub employee_reviews: EmployeeReviews,
    pub red_flags: RedFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSentiment {
    /// Aggregate sentiment, rescaled to `[0, 100]`.
    pub score: u32,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFeedback {
    pub platform: String,
    /// Per-platform sentiment, rescaled to `[0, 100]`.
    pub sentiment_score: u32,
    pub recent_discussions: Vec<Discussion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub title: String,
    pub url: String,
    pub date: String,
    pub summary: String,
    pub key_quotes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReviews {
    pub aggregated_score: f64,
    pub total_reviews: u32,
    pub sources: Vec<ReviewSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSource {
    pub platform: String,
    pub rating: f64,
    pub review_count: u32,
    pub recent_reviews: Vec<EmployeeReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReview {
    pub date: String,
    pub rating: f64,
    pub position: String,
    pub pros: String,
    pub cons: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlags {
    pub identified: Vec<String>,
    pub explanation: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Lenient parse for model output; anything unrecognized is `Low`.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("high") {
            Severity::High
        } else if raw.eq_ignore_ascii_case("medium") {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Technical validation branch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalValidation {
    pub domain_analysis: TechnicalDomainAnalysis,
    pub contact_validation: ContactValidation,
    pub security_checks: SecurityChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDomainAnalysis {
    pub email_domain_age: String,
    pub spf_record: bool,
    pub dkim_valid: bool,
    pub website_ssl: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactValidation {
    pub email_format: String,
    pub phone_number_valid: bool,
    pub physical_address: PhysicalAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalAddress {
    pub exists: bool,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityChecks {
    pub malicious_link_check: bool,
    pub phishing_score: f64,
    pub suspicious_patterns: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Citations and metadata
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(rename = "type")]
    pub citation_type: CitationType,
    pub platform: String,
    pub url: String,
    pub title: String,
    pub date: String,
    pub relevance: f64,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    CompanyProfile,
    JobBoard,
    ReviewSite,
    Community,
    News,
    Technical,
    Other,
}

impl CitationType {
    /// Lenient parse for model output; anything unrecognized is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "company_profile" => CitationType::CompanyProfile,
            "job_board" => CitationType::JobBoard,
            "review_site" => CitationType::ReviewSite,
            "community" => CitationType::Community,
            "news" => CitationType::News,
            "technical" => CitationType::Technical,
            _ => CitationType::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub timestamp: String,
    pub data_sources_used: Vec<String>,
    /// Structurally derived: how much evidence was available, not how
    /// accurate it is. See `analysis::confidence`.
    pub confidence_score: u32,
    pub limitations_note: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy projection views (computed, kept for older clients)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostingHistory {
    pub summary: String,
    pub explanation: String,
    pub sources: Vec<RepostingSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostingSource {
    pub platform: String,
    pub url: String,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySentiment {
    pub summary: String,
    pub reddit_analysis: Vec<SentimentEntry>,
    pub blind_analysis: Vec<SentimentEntry>,
    pub glassdoor_analysis: Vec<GlassdoorReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentEntry {
    pub sentiment: String,
    pub quote: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlassdoorReview {
    pub rating: f64,
    pub review: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub realistic_requirements: bool,
    pub salary_provided: bool,
    pub posting_age: String,
    pub reposted_times: u32,
    pub consistency_across_sites: bool,
    pub requirements: RequirementsDetail,
    pub salary: SalaryDetail,
    pub cross_platform_comparison: Vec<ComparisonListing>,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsDetail {
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryDetail {
    pub range: String,
    pub currency: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonListing {
    pub platform: String,
    pub url: String,
    pub title: String,
    pub requirements: Vec<String>,
    pub salary: String,
    pub date: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Data source index
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSources {
    pub company_info: Vec<CompanyInfoSource>,
    pub job_posting_info: Vec<JobPostingSource>,
    pub market_data: Vec<MarketDataPoint>,
    pub community_feedback: Vec<CommunityFeedbackSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoSource {
    pub source: String,
    pub url: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingSource {
    pub platform: String,
    pub url: String,
    pub post_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataPoint {
    pub source: String,
    pub data_point: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityFeedbackSource {
    pub platform: String,
    pub review_count: u32,
    pub last_updated: String,
}
