//! Assembles the fact-check prompt sent to the model.
//! Pure string construction; the only variability is the job facts block.

use crate::analysis::models::JobQuery;

const PROMPT_HEADER: &str =
    "Analyze this job posting and return a detailed breakdown in this exact JSON format:";

/// The literal JSON template the model must fill. Legacy views and the
/// confidence score are synthesized server-side and deliberately absent.
const PROMPT_SCHEMA: &str = r#"Required JSON format:
{
  "trustScore": number (0.0 - 1.0),
  "reasoning": "Overall summary of the job's legitimacy.",
  "companyVerification": {
    "summary": string,
    "linkedInData": {
      "exists": boolean,
      "url": string,
      "employeeCount": number,
      "industry": string,
      "foundedYear": string,
      "lastUpdated": string
    },
    "crunchbaseData": {
      "exists": boolean,
      "fundingStatus": string,
      "totalFunding": string,
      "lastFundingDate": string,
      "investors": [string]
    },
    "domainAnalysis": {
      "websiteAge": string,
      "emailDomainValid": boolean,
      "hasSecureWebsite": boolean,
      "hasCareerPage": boolean
    },
    "officialPresence": {
      "platforms": [
        {"name": string, "url": string, "verified": boolean, "followers": number, "lastActivity": string}
      ]
    }
  },
  "jobPostingAnalysis": {
    "crossPlatformPresence": [
      {"platform": string, "url": string, "postDate": string, "salary": string, "requirements": [string], "applicationMethod": string, "contactInfo": string}
    ],
    "consistencyAnalysis": {
      "requirementsConsistent": boolean,
      "salaryRangeConsistent": boolean,
      "contactMethodConsistent": boolean,
      "descriptionSimilarity": number,
      "inconsistencies": [string]
    },
    "repostingPatterns": {
      "frequency": string,
      "platforms": [string],
      "variations": [string],
      "suspiciousPatterns": [string]
    },
    "marketAlignment": {
      "salaryAnalysis": {
        "range": string,
        "marketComparison": string,
        "sources": [{"platform": string, "dataPoint": string, "date": string}]
      },
      "skillsAnalysis": {
        "requiredSkills": [string],
        "marketDemand": string,
        "unusualRequirements": [string]
      }
    }
  },
  "communityInsights": {
    "overallSentiment": {"score": number (0.0 - 1.0), "summary": string},
    "platformFeedback": [
      {
        "platform": string,
        "sentimentScore": number (0.0 - 1.0),
        "recentDiscussions": [
          {"title": string, "url": string, "date": string, "summary": string, "keyQuotes": [string]}
        ]
      }
    ],
    "employeeReviews": {
      "aggregatedScore": number,
      "totalReviews": number,
      "sources": [
        {
          "platform": string,
          "rating": number,
          "reviewCount": number,
          "recentReviews": [
            {"date": string, "rating": number, "position": string, "pros": string, "cons": string}
          ]
        }
      ]
    },
    "redFlags": {
      "identified": [string],
      "explanation": string,
      "severity": "low" | "medium" | "high"
    }
  },
  "technicalValidation": {
    "domainAnalysis": {
      "emailDomainAge": string,
      "spfRecord": boolean,
      "dkimValid": boolean,
      "websiteSSL": boolean
    },
    "contactValidation": {
      "emailFormat": string,
      "phoneNumberValid": boolean,
      "physicalAddress": {"exists": boolean, "verified": boolean}
    },
    "securityChecks": {
      "maliciousLinkCheck": boolean,
      "phishingScore": number,
      "suspiciousPatterns": [string]
    }
  },
  "citations": [
    {
      "type": "company_profile" | "job_board" | "review_site" | "community" | "news" | "technical",
      "platform": string,
      "url": string,
      "title": string,
      "date": string,
      "relevance": number (0.0 - 1.0),
      "verified": boolean
    }
  ],
  "analysisMetadata": {
    "dataSourcesUsed": [string],
    "limitationsNote": string
  }
}

Instructions:
1. Prioritize official sources (company website, LinkedIn, Crunchbase) over aggregators.
2. Include at least 3 sources per metric where available.
3. Sort citations with official sources first.
4. Include a date for every source and citation.
5. Use "Not listed" as the salary for listings that do not disclose one.
6. All trustScore and sentiment scores must be between 0.0 and 1.0.

IMPORTANT: Respond ONLY with the JSON object, no additional text."#;

/// Builds the user prompt: job facts, the JSON template the response must
/// conform to, and sourcing instructions.
pub fn build_prompt(query: &JobQuery) -> String {
    let mut facts = format!(
        "Job Title: {}\nCompany: {}\n",
        query.job_title, query.company_name
    );
    if let Some(link) = nonblank(query.job_link.as_deref()) {
        facts.push_str(&format!("Link: {link}\n"));
    }
    if let Some(location) = nonblank(query.location.as_deref()) {
        facts.push_str(&format!("Location: {location}\n"));
    }

    format!("{}\n\n{}\n{}", PROMPT_HEADER, facts, PROMPT_SCHEMA)
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
