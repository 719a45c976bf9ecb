//! Competency Assessor - dual-domain scoring of survey responses.

use serde::{Deserialize, Serialize};

use super::{CompetencyProfile, ResponseValue, Responses};
use crate::domain::foundation::{KnowledgeDomain, SkillLevel};

/// Score threshold separating a strong domain from a weak one.
pub const STRENGTH_THRESHOLD: f64 = 40.0;

/// Bonus added per experience flag.
pub const EXPERIENCE_BONUS: f64 = 10.0;

/// Flags that earn an experience bonus in every domain.
const BONUS_FLAGS: [&str; 2] = ["ai_experience", "prompt_experience"];

/// How the two domain scores relate to the strength threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthPattern {
    BothStrong,
    BothWeak,
    Mixed,
}

/// Score and Dreyfus level within one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: KnowledgeDomain,
    pub score: f64,
    pub level: SkillLevel,
}

/// Result of assessing a survey in both domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualDomainAssessment {
    pub technical: DomainScore,
    pub educational: DomainScore,
    pub overall_score: f64,
    pub dominant_domain: KnowledgeDomain,
    pub weak_domain: KnowledgeDomain,
    pub strength_pattern: StrengthPattern,
    pub responses: Responses,
}

impl DualDomainAssessment {
    /// Returns the per-domain score.
    pub fn score_for(&self, domain: KnowledgeDomain) -> &DomainScore {
        match domain {
            KnowledgeDomain::Technical => &self.technical,
            KnowledgeDomain::Educational => &self.educational,
        }
    }

    /// Builds the engine input for one domain.
    pub fn profile_for(&self, domain: KnowledgeDomain) -> CompetencyProfile {
        let score = self.score_for(domain);
        CompetencyProfile {
            score: score.score,
            domain,
            level: score.level,
            responses: self.responses.clone(),
        }
    }

    /// Builds the engine input for the dominant domain.
    pub fn dominant_profile(&self) -> CompetencyProfile {
        self.profile_for(self.dominant_domain)
    }
}

/// Survey scoring functions.
pub struct CompetencyAssessor;

impl CompetencyAssessor {
    /// Scores one domain on a 0-100 scale.
    ///
    /// # Algorithm
    /// score = mean(numeric answers whose key starts with the domain prefix)
    ///       + 10 per set experience flag, capped at 100, rounded to 2 decimals
    ///
    /// # Edge Cases
    /// - No responses at all: 0
    /// - No answers for this domain: 0, bonuses are not applied
    /// - Flag answers under a domain key are ignored
    pub fn domain_score(responses: &Responses, domain: KnowledgeDomain) -> f64 {
        let answers: Vec<f64> = responses
            .iter()
            .filter(|(key, _)| key.starts_with(domain.response_prefix()))
            .filter_map(|(_, value)| value.as_number())
            .collect();

        if answers.is_empty() {
            return 0.0;
        }

        let bonus: f64 = BONUS_FLAGS
            .iter()
            .filter(|flag| responses.get(**flag).is_some_and(ResponseValue::is_truthy))
            .map(|_| EXPERIENCE_BONUS)
            .sum();

        let average = answers.iter().sum::<f64>() / answers.len() as f64;
        let total = (average + bonus).clamp(0.0, 100.0);
        (total * 100.0).round() / 100.0
    }

    /// Assesses both domains and classifies their relative strength.
    ///
    /// The dominant domain is the higher-scoring one; ties go to the
    /// educational domain.
    pub fn assess(responses: &Responses) -> DualDomainAssessment {
        let tech_score = Self::domain_score(responses, KnowledgeDomain::Technical);
        let edu_score = Self::domain_score(responses, KnowledgeDomain::Educational);

        let tech_strong = tech_score >= STRENGTH_THRESHOLD;
        let edu_strong = edu_score >= STRENGTH_THRESHOLD;

        let strength_pattern = match (tech_strong, edu_strong) {
            (true, true) => StrengthPattern::BothStrong,
            (false, false) => StrengthPattern::BothWeak,
            _ => StrengthPattern::Mixed,
        };

        let dominant_domain = match strength_pattern {
            StrengthPattern::Mixed if tech_strong => KnowledgeDomain::Technical,
            StrengthPattern::Mixed => KnowledgeDomain::Educational,
            _ if tech_score > edu_score => KnowledgeDomain::Technical,
            _ => KnowledgeDomain::Educational,
        };

        DualDomainAssessment {
            technical: DomainScore {
                domain: KnowledgeDomain::Technical,
                score: tech_score,
                level: SkillLevel::from_score(tech_score),
            },
            educational: DomainScore {
                domain: KnowledgeDomain::Educational,
                score: edu_score,
                level: SkillLevel::from_score(edu_score),
            },
            overall_score: (tech_score + edu_score) / 2.0,
            dominant_domain,
            weak_domain: dominant_domain.other(),
            strength_pattern,
            responses: responses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(entries: &[(&str, ResponseValue)]) -> Responses {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn domain_score_averages_prefixed_answers() {
        let r = responses(&[
            ("tech_1", 30.0.into()),
            ("tech_2", 45.0.into()),
            ("edu_1", 5.0.into()),
        ]);
        assert_eq!(CompetencyAssessor::domain_score(&r, KnowledgeDomain::Technical), 37.5);
        assert_eq!(CompetencyAssessor::domain_score(&r, KnowledgeDomain::Educational), 5.0);
    }

    #[test]
    fn domain_score_adds_capped_bonus() {
        let r = responses(&[
            ("tech_1", 95.0.into()),
            ("ai_experience", true.into()),
            ("prompt_experience", true.into()),
        ]);
        assert_eq!(CompetencyAssessor::domain_score(&r, KnowledgeDomain::Technical), 100.0);

        let r = responses(&[("edu_1", 30.0.into()), ("ai_experience", true.into())]);
        assert_eq!(CompetencyAssessor::domain_score(&r, KnowledgeDomain::Educational), 40.0);
    }

    #[test]
    fn domain_score_without_answers_is_zero() {
        let r = responses(&[("ai_experience", true.into())]);
        assert_eq!(CompetencyAssessor::domain_score(&r, KnowledgeDomain::Technical), 0.0);
        assert_eq!(CompetencyAssessor::domain_score(&Responses::new(), KnowledgeDomain::Technical), 0.0);
    }

    #[test]
    fn assess_mixed_profile() {
        let r = responses(&[("tech_1", 60.0.into()), ("edu_1", 15.0.into())]);
        let assessment = CompetencyAssessor::assess(&r);

        assert_eq!(assessment.strength_pattern, StrengthPattern::Mixed);
        assert_eq!(assessment.dominant_domain, KnowledgeDomain::Technical);
        assert_eq!(assessment.weak_domain, KnowledgeDomain::Educational);
        assert_eq!(assessment.technical.level, SkillLevel::Competent);
        assert_eq!(assessment.educational.level, SkillLevel::Novice);
        assert_eq!(assessment.overall_score, 37.5);
    }

    #[test]
    fn assess_both_strong_picks_higher_domain() {
        let r = responses(&[("tech_1", 45.0.into()), ("edu_1", 85.0.into())]);
        let assessment = CompetencyAssessor::assess(&r);
        assert_eq!(assessment.strength_pattern, StrengthPattern::BothStrong);
        assert_eq!(assessment.dominant_domain, KnowledgeDomain::Educational);
        assert_eq!(assessment.educational.level, SkillLevel::Expert);
    }

    #[test]
    fn assess_both_weak_picks_less_weak_domain() {
        let r = responses(&[("tech_1", 25.0.into()), ("edu_1", 5.0.into())]);
        let assessment = CompetencyAssessor::assess(&r);
        assert_eq!(assessment.strength_pattern, StrengthPattern::BothWeak);
        assert_eq!(assessment.dominant_domain, KnowledgeDomain::Technical);
    }

    #[test]
    fn dominant_profile_carries_domain_score_and_level() {
        let r = responses(&[("tech_1", 70.0.into()), ("edu_1", 15.0.into())]);
        let profile = CompetencyAssessor::assess(&r).dominant_profile();
        assert_eq!(profile.domain, KnowledgeDomain::Technical);
        assert_eq!(profile.score, 70.0);
        assert_eq!(profile.level, SkillLevel::Proficient);
        assert_eq!(profile.responses.len(), 2);
    }
}
