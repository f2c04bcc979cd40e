use super::domain::{BasicInfo, FamilyMember, Generation, Lifestyle, UserData};
use super::labs::LabPanel;

/// Request facets derived once and shared by every disease assessment.
#[derive(Debug, Clone)]
pub struct AssessmentContext<'a> {
    pub basic: BasicInfo,
    /// `None` when the request carried no lifestyle answers at all.
    pub lifestyle: Option<&'a Lifestyle>,
    pub family: &'a [FamilyMember],
    pub labs: LabPanel,
}

impl<'a> AssessmentContext<'a> {
    pub fn from_user_data(user: &'a UserData) -> Self {
        Self {
            basic: BasicInfo::from_profile(user.patient.as_ref()),
            lifestyle: user.lifestyle.as_ref().filter(|lifestyle| !lifestyle.is_empty()),
            family: &user.family,
            labs: LabPanel::from_values(&user.lab_values),
        }
    }

    /// Lifestyle answers with central defaults for anything unanswered.
    pub fn lifestyle_or_default(&self) -> &Lifestyle {
        self.lifestyle.unwrap_or(&Lifestyle::EMPTY)
    }

    pub fn affected_relatives<'s>(
        &'s self,
        disease_id: &'s str,
    ) -> impl Iterator<Item = &'a FamilyMember> + 's {
        self.family
            .iter()
            .filter(move |member| member.has_condition(disease_id))
    }

    pub fn has_family_history(&self, disease_id: &str) -> bool {
        self.affected_relatives(disease_id).next().is_some()
    }

    /// Affected relatives split into (first-degree, extended) counts.
    pub fn affected_by_degree(&self, disease_id: &str) -> (usize, usize) {
        self.affected_relatives(disease_id)
            .fold((0, 0), |(first, extended), member| {
                if member.generation == Generation::Extended {
                    (first, extended + 1)
                } else {
                    (first + 1, extended)
                }
            })
    }
}
