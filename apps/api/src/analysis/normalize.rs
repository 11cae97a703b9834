//! Result normalizer / enrichment pipeline: the designed core of the
//! service.
//!
//! Contract: deterministic, pure, total. For any well-formed JSON object
//! input (including `{}`), `normalize` returns a result with every
//! documented leaf present and correctly typed. Unexpected shapes degrade to
//! defaults rather than aborting the request; the upstream model's output is
//! inherently unreliable and partial results beat hard failures.
//!
//! Steps, in order:
//! 1. scalar defaults (trust score, reasoning)
//! 2. deep default-fill of the four analysis branches and citations
//! 3. score rescaling 0.0–1.0 → 0–100, applied exactly once, straight off
//!    the raw payload (re-running normalize on its own output would
//!    double-scale, so nothing downstream may re-apply it)
//! 4. confidence derivation from the filled branches
//! 5. legacy projection synthesis from already-normalized data

use chrono::Utc;
use serde_json::Value;

use crate::analysis::confidence;
use crate::analysis::extract::{
    bool_or, count_or, f64_or, field, items, str_list, str_or, NOT_AVAILABLE, NOT_DISCLOSED,
    NOT_LISTED, NOT_SPECIFIED,
};
use crate::analysis::legacy;
use crate::analysis::models::*;

/// Placeholder when the model returns no reasoning text.
const DEFAULT_REASONING: &str = "No reasoning was provided by the analysis.";
const DEFAULT_LIMITATIONS: &str =
    "Analysis is based on publicly available information and has not been independently verified.";

/// Normalizes the raw model payload into the full response contract.
pub fn normalize(raw: &Value, query: &JobQuery) -> JobAnalysisResult {
    let trust_score = scale_unit_score(raw.get("trustScore").and_then(Value::as_f64).unwrap_or(0.0));
    let reasoning = str_or(raw, "reasoning", DEFAULT_REASONING);

    let company_verification = fill_company_verification(field(raw, "companyVerification"));
    let job_posting_analysis = fill_job_posting_analysis(field(raw, "jobPostingAnalysis"));
    let community_insights = fill_community_insights(field(raw, "communityInsights"));
    let technical_validation = fill_technical_validation(field(raw, "technicalValidation"));
    let citations = items(raw, "citations").iter().map(fill_citation).collect();

    let confidence_score = confidence::overall_confidence(
        &company_verification,
        &job_posting_analysis,
        &community_insights,
        &technical_validation,
    );

    let raw_metadata = field(raw, "analysisMetadata");
    let analysis_metadata = AnalysisMetadata {
        timestamp: Utc::now().to_rfc3339(),
        data_sources_used: str_list(raw_metadata, "dataSourcesUsed"),
        confidence_score,
        limitations_note: str_or(raw_metadata, "limitationsNote", DEFAULT_LIMITATIONS),
    };

    let reposting_history = legacy::project_reposting_history(&job_posting_analysis, query);
    let community_sentiment = legacy::project_community_sentiment(&community_insights);
    let job_details = legacy::project_job_details(&job_posting_analysis, query);
    let data_sources = legacy::project_data_sources(
        &company_verification,
        &job_posting_analysis,
        &community_insights,
    );

    JobAnalysisResult {
        trust_score,
        reasoning,
        job_title: query.job_title.clone(),
        company_name: query.company_name.clone(),
        company_verification,
        job_posting_analysis,
        community_insights,
        technical_validation,
        citations,
        analysis_metadata,
        reposting_history,
        community_sentiment,
        job_details,
        data_sources,
    }
}

/// Converts a model-side `[0.0, 1.0]` score to the response-side integer
/// `[0, 100]` scale. Out-of-range or non-finite input is clamped first.
fn scale_unit_score(raw: f64) -> u32 {
    let clamped = if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (clamped * 100.0).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Branch fills, one function per documented sub-tree
// ────────────────────────────────────────────────────────────────────────────

fn fill_company_verification(v: &Value) -> CompanyVerification {
    let linked_in = field(v, "linkedInData");
    let crunchbase = field(v, "crunchbaseData");
    let domain = field(v, "domainAnalysis");
    CompanyVerification {
        summary: str_or(v, "summary", NOT_AVAILABLE),
        linked_in_data: LinkedInData {
            exists: bool_or(linked_in, "exists"),
            url: str_or(linked_in, "url", NOT_AVAILABLE),
            employee_count: count_or(linked_in, "employeeCount"),
            industry: str_or(linked_in, "industry", NOT_SPECIFIED),
            founded_year: str_or(linked_in, "foundedYear", NOT_SPECIFIED),
            last_updated: str_or(linked_in, "lastUpdated", NOT_AVAILABLE),
        },
        crunchbase_data: CrunchbaseData {
            exists: bool_or(crunchbase, "exists"),
            funding_status: str_or(crunchbase, "fundingStatus", NOT_DISCLOSED),
            total_funding: str_or(crunchbase, "totalFunding", NOT_DISCLOSED),
            last_funding_date: str_or(crunchbase, "lastFundingDate", NOT_AVAILABLE),
            investors: str_list(crunchbase, "investors"),
        },
        domain_analysis: CompanyDomainAnalysis {
            website_age: str_or(domain, "websiteAge", NOT_AVAILABLE),
            email_domain_valid: bool_or(domain, "emailDomainValid"),
            has_secure_website: bool_or(domain, "hasSecureWebsite"),
            has_career_page: bool_or(domain, "hasCareerPage"),
        },
        official_presence: OfficialPresence {
            platforms: items(field(v, "officialPresence"), "platforms")
                .iter()
                .map(fill_presence_platform)
                .collect(),
        },
    }
}

fn fill_presence_platform(v: &Value) -> PresencePlatform {
    PresencePlatform {
        name: str_or(v, "name", NOT_SPECIFIED),
        url: str_or(v, "url", NOT_AVAILABLE),
        verified: bool_or(v, "verified"),
        followers: count_or(v, "followers"),
        last_activity: str_or(v, "lastActivity", NOT_AVAILABLE),
    }
}

fn fill_job_posting_analysis(v: &Value) -> JobPostingAnalysis {
    let consistency = field(v, "consistencyAnalysis");
    let reposting = field(v, "repostingPatterns");
    let market = field(v, "marketAlignment");
    let salary = field(market, "salaryAnalysis");
    let skills = field(market, "skillsAnalysis");
    JobPostingAnalysis {
        cross_platform_presence: items(v, "crossPlatformPresence")
            .iter()
            .map(fill_cross_platform_listing)
            .collect(),
        consistency_analysis: ConsistencyAnalysis {
            requirements_consistent: bool_or(consistency, "requirementsConsistent"),
            salary_range_consistent: bool_or(consistency, "salaryRangeConsistent"),
            contact_method_consistent: bool_or(consistency, "contactMethodConsistent"),
            description_similarity: f64_or(consistency, "descriptionSimilarity"),
            inconsistencies: str_list(consistency, "inconsistencies"),
        },
        reposting_patterns: RepostingPatterns {
            frequency: str_or(reposting, "frequency", NOT_SPECIFIED),
            platforms: str_list(reposting, "platforms"),
            variations: str_list(reposting, "variations"),
            suspicious_patterns: str_list(reposting, "suspiciousPatterns"),
        },
        market_alignment: MarketAlignment {
            salary_analysis: SalaryAnalysis {
                range: str_or(salary, "range", NOT_DISCLOSED),
                market_comparison: str_or(salary, "marketComparison", NOT_AVAILABLE),
                sources: items(salary, "sources")
                    .iter()
                    .map(fill_salary_data_point)
                    .collect(),
            },
            skills_analysis: SkillsAnalysis {
                required_skills: str_list(skills, "requiredSkills"),
                market_demand: str_or(skills, "marketDemand", NOT_AVAILABLE),
                unusual_requirements: str_list(skills, "unusualRequirements"),
            },
        },
    }
}

fn fill_cross_platform_listing(v: &Value) -> CrossPlatformListing {
    CrossPlatformListing {
        platform: str_or(v, "platform", NOT_SPECIFIED),
        url: str_or(v, "url", NOT_AVAILABLE),
        post_date: str_or(v, "postDate", NOT_AVAILABLE),
        salary: str_or(v, "salary", NOT_LISTED),
        requirements: str_list(v, "requirements"),
        application_method: str_or(v, "applicationMethod", NOT_SPECIFIED),
        contact_info: str_or(v, "contactInfo", NOT_AVAILABLE),
    }
}

fn fill_salary_data_point(v: &Value) -> SalaryDataPoint {
    SalaryDataPoint {
        platform: str_or(v, "platform", NOT_SPECIFIED),
        data_point: str_or(v, "dataPoint", NOT_AVAILABLE),
        date: str_or(v, "date", NOT_AVAILABLE),
    }
}

fn fill_community_insights(v: &Value) -> CommunityInsights {
    let sentiment = field(v, "overallSentiment");
    let reviews = field(v, "employeeReviews");
    let red_flags = field(v, "redFlags");
    CommunityInsights {
        overall_sentiment: OverallSentiment {
            score: scale_unit_score(f64_or(sentiment, "score")),
            summary: str_or(sentiment, "summary", NOT_AVAILABLE),
        },
        platform_feedback: items(v, "platformFeedback")
            .iter()
            .map(fill_platform_feedback)
            .collect(),
        employee_reviews: EmployeeReviews {
            aggregated_score: f64_or(reviews, "aggregatedScore"),
            total_reviews: count_or(reviews, "totalReviews"),
            sources: items(reviews, "sources")
                .iter()
                .map(fill_review_source)
                .collect(),
        },
        red_flags: RedFlags {
            identified: str_list(red_flags, "identified"),
            explanation: str_or(red_flags, "explanation", NOT_AVAILABLE),
            severity: Severity::parse(
                field(red_flags, "severity").as_str().unwrap_or_default(),
            ),
        },
    }
}

fn fill_platform_feedback(v: &Value) -> PlatformFeedback {
    PlatformFeedback {
        platform: str_or(v, "platform", NOT_SPECIFIED),
        sentiment_score: scale_unit_score(f64_or(v, "sentimentScore")),
        recent_discussions: items(v, "recentDiscussions")
            .iter()
            .map(fill_discussion)
            .collect(),
    }
}

fn fill_discussion(v: &Value) -> Discussion {
    Discussion {
        title: str_or(v, "title", NOT_AVAILABLE),
        url: str_or(v, "url", NOT_AVAILABLE),
        date: str_or(v, "date", NOT_AVAILABLE),
        summary: str_or(v, "summary", NOT_AVAILABLE),
        key_quotes: str_list(v, "keyQuotes"),
    }
}

fn fill_review_source(v: &Value) -> ReviewSource {
    ReviewSource {
        platform: str_or(v, "platform", NOT_SPECIFIED),
        rating: f64_or(v, "rating"),
        review_count: count_or(v, "reviewCount"),
        recent_reviews: items(v, "recentReviews")
            .iter()
            .map(fill_employee_review)
            .collect(),
    }
}

fn fill_employee_review(v: &Value) -> EmployeeReview {
    EmployeeReview {
        date: str_or(v, "date", NOT_AVAILABLE),
        rating: f64_or(v, "rating"),
        position: str_or(v, "position", NOT_SPECIFIED),
        // Review bodies default to empty so projections can tell "no text"
        // from placeholder text.
        pros: str_or(v, "pros", ""),
        cons: str_or(v, "cons", ""),
    }
}

fn fill_technical_validation(v: &Value) -> TechnicalValidation {
    let domain = field(v, "domainAnalysis");
    let contact = field(v, "contactValidation");
    let address = field(contact, "physicalAddress");
    let security = field(v, "securityChecks");
    TechnicalValidation {
        domain_analysis: TechnicalDomainAnalysis {
            email_domain_age: str_or(domain, "emailDomainAge", NOT_AVAILABLE),
            spf_record: bool_or(domain, "spfRecord"),
            dkim_valid: bool_or(domain, "dkimValid"),
            website_ssl: bool_or(domain, "websiteSSL"),
        },
        contact_validation: ContactValidation {
            email_format: str_or(contact, "emailFormat", NOT_AVAILABLE),
            phone_number_valid: bool_or(contact, "phoneNumberValid"),
            physical_address: PhysicalAddress {
                exists: bool_or(address, "exists"),
                verified: bool_or(address, "verified"),
            },
        },
        security_checks: SecurityChecks {
            malicious_link_check: bool_or(security, "maliciousLinkCheck"),
            phishing_score: f64_or(security, "phishingScore"),
            suspicious_patterns: str_list(security, "suspiciousPatterns"),
        },
    }
}

fn fill_citation(v: &Value) -> Citation {
    Citation {
        citation_type: CitationType::parse(field(v, "type").as_str().unwrap_or_default()),
        platform: str_or(v, "platform", NOT_SPECIFIED),
        url: str_or(v, "url", NOT_AVAILABLE),
        title: str_or(v, "title", NOT_AVAILABLE),
        date: str_or(v, "date", NOT_AVAILABLE),
        relevance: f64_or(v, "relevance"),
        verified: bool_or(v, "verified"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query() -> JobQuery {
        JobQuery {
            job_title: "Software Engineer".to_string(),
            company_name: "Acme Inc.".to_string(),
            job_link: Some(String::new()),
            location: None,
        }
    }

    #[test]
    fn test_empty_object_yields_fully_defaulted_result() {
        let result = normalize(&json!({}), &query());

        assert_eq!(result.trust_score, 0);
        assert_eq!(result.reasoning, DEFAULT_REASONING);
        assert_eq!(result.job_title, "Software Engineer");
        assert_eq!(result.company_name, "Acme Inc.");

        assert!(!result.company_verification.linked_in_data.exists);
        assert_eq!(
            result.company_verification.linked_in_data.url,
            NOT_AVAILABLE
        );
        assert_eq!(result.company_verification.linked_in_data.employee_count, 0);
        assert_eq!(
            result.company_verification.crunchbase_data.funding_status,
            NOT_DISCLOSED
        );
        assert!(result.company_verification.official_presence.platforms.is_empty());

        assert!(result.job_posting_analysis.cross_platform_presence.is_empty());
        assert_eq!(
            result.job_posting_analysis.reposting_patterns.frequency,
            NOT_SPECIFIED
        );
        assert_eq!(
            result
                .job_posting_analysis
                .market_alignment
                .salary_analysis
                .range,
            NOT_DISCLOSED
        );

        assert_eq!(result.community_insights.overall_sentiment.score, 0);
        assert_eq!(result.community_insights.red_flags.severity, Severity::Low);
        assert!(result.community_insights.platform_feedback.is_empty());

        assert!(!result.technical_validation.domain_analysis.spf_record);
        assert_eq!(
            result.technical_validation.contact_validation.email_format,
            NOT_AVAILABLE
        );

        assert!(result.citations.is_empty());
        assert_eq!(result.analysis_metadata.confidence_score, 0);
        assert_eq!(
            result.analysis_metadata.limitations_note,
            DEFAULT_LIMITATIONS
        );

        // Legacy views exist even with nothing to project.
        assert_eq!(result.job_details.reposted_times, 0);
        assert!(!result.job_details.salary_provided);
        assert_eq!(result.job_details.posting_age, "Unknown");
        assert!(result.reposting_history.sources.is_empty());
        assert!(result.community_sentiment.reddit_analysis.is_empty());
        assert!(result.data_sources.company_info.is_empty());
    }

    #[test]
    fn test_every_leaf_serializes_without_nulls() {
        let serialized = serde_json::to_value(normalize(&json!({}), &query())).unwrap();

        fn assert_no_nulls(v: &Value, path: &str) {
            match v {
                Value::Null => panic!("null leaf at {path}"),
                Value::Object(map) => {
                    for (k, child) in map {
                        assert_no_nulls(child, &format!("{path}.{k}"));
                    }
                }
                Value::Array(list) => {
                    for (i, child) in list.iter().enumerate() {
                        assert_no_nulls(child, &format!("{path}[{i}]"));
                    }
                }
                _ => {}
            }
        }
        assert_no_nulls(&serialized, "$");
    }

    #[test]
    fn test_trust_score_rescaled_exactly_once() {
        let result = normalize(&json!({"trustScore": 0.6}), &query());
        assert_eq!(result.trust_score, 60);

        // Feeding already-scaled output back in double-scales (clamped), so
        // the pipeline must only ever apply the rescale to raw payloads.
        let rescaled = normalize(&json!({"trustScore": 60}), &query());
        assert_ne!(rescaled.trust_score, result.trust_score);
    }

    #[test]
    fn test_sentiment_scores_rescaled() {
        let result = normalize(
            &json!({
                "communityInsights": {
                    "overallSentiment": {"score": 0.42, "summary": "mixed"},
                    "platformFeedback": [
                        {"platform": "Reddit", "sentimentScore": 0.8},
                        {"platform": "Blind", "sentimentScore": "bad"}
                    ]
                }
            }),
            &query(),
        );
        assert_eq!(result.community_insights.overall_sentiment.score, 42);
        assert_eq!(
            result.community_insights.platform_feedback[0].sentiment_score,
            80
        );
        // Mistyped score degrades to 0, not an error.
        assert_eq!(
            result.community_insights.platform_feedback[1].sentiment_score,
            0
        );
    }

    #[test]
    fn test_scale_unit_score_clamps_out_of_range() {
        assert_eq!(scale_unit_score(0.0), 0);
        assert_eq!(scale_unit_score(1.0), 100);
        assert_eq!(scale_unit_score(0.856), 86);
        assert_eq!(scale_unit_score(-0.2), 0);
        assert_eq!(scale_unit_score(60.0), 100);
        assert_eq!(scale_unit_score(f64::NAN), 0);
    }

    #[test]
    fn test_wrongly_typed_branches_degrade_to_defaults() {
        let result = normalize(
            &json!({
                "trustScore": "high",
                "reasoning": 12,
                "companyVerification": "not an object",
                "jobPostingAnalysis": {"crossPlatformPresence": {"not": "an array"}},
                "citations": "nope"
            }),
            &query(),
        );
        assert_eq!(result.trust_score, 0);
        assert_eq!(result.reasoning, DEFAULT_REASONING);
        assert!(!result.company_verification.linked_in_data.exists);
        assert!(result.job_posting_analysis.cross_platform_presence.is_empty());
        assert!(result.citations.is_empty());
    }

    #[test]
    fn test_partial_listing_fills_remaining_leaves() {
        let result = normalize(
            &json!({
                "jobPostingAnalysis": {
                    "crossPlatformPresence": [
                        {"platform": "Indeed", "postDate": "2025-02-11"}
                    ]
                }
            }),
            &query(),
        );
        let listing = &result.job_posting_analysis.cross_platform_presence[0];
        assert_eq!(listing.platform, "Indeed");
        assert_eq!(listing.salary, NOT_LISTED);
        assert_eq!(listing.url, NOT_AVAILABLE);
        assert!(listing.requirements.is_empty());
    }

    #[test]
    fn test_citations_filled_defensively() {
        let result = normalize(
            &json!({
                "citations": [
                    {"type": "job_board", "platform": "Indeed", "url": "https://x", "relevance": 0.7, "verified": true},
                    {"type": "made_up_kind"},
                    42
                ]
            }),
            &query(),
        );
        assert_eq!(result.citations.len(), 3);
        assert_eq!(result.citations[0].citation_type, CitationType::JobBoard);
        assert!(result.citations[0].verified);
        assert_eq!(result.citations[1].citation_type, CitationType::Other);
        // Even a non-object citation entry becomes a fully-defaulted record.
        assert_eq!(result.citations[2].platform, NOT_SPECIFIED);
        assert_eq!(result.citations[2].relevance, 0.0);
    }

    #[test]
    fn test_realistic_payload_end_to_end() {
        let raw = json!({
            "trustScore": 0.6,
            "reasoning": "Looks mostly legitimate.",
            "companyVerification": {},
            "jobPostingAnalysis": {"crossPlatformPresence": []},
            "communityInsights": {"overallSentiment": {"score": 0}},
            "technicalValidation": {},
            "citations": []
        });
        let result = normalize(&raw, &query());
        assert_eq!(result.trust_score, 60);
        assert!(!result.company_verification.linked_in_data.exists);
        assert_eq!(result.job_details.reposted_times, 0);
        assert!(!result.job_details.salary_provided);
        assert_eq!(result.analysis_metadata.confidence_score, 0);
    }

    #[test]
    fn test_metadata_passthrough_fields() {
        let result = normalize(
            &json!({
                "analysisMetadata": {
                    "dataSourcesUsed": ["LinkedIn", "Indeed"],
                    "limitationsNote": "Search coverage was limited."
                }
            }),
            &query(),
        );
        assert_eq!(
            result.analysis_metadata.data_sources_used,
            vec!["LinkedIn", "Indeed"]
        );
        assert_eq!(
            result.analysis_metadata.limitations_note,
            "Search coverage was limited."
        );
    }
}
