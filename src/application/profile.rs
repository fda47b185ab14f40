use crate::domain::{
    Address, Company, CreatedProfile, DirectoryService, DomainError, NewDirectoryUser, ProfileDraft,
};
use std::sync::Arc;
use tracing::info;

pub const PROFILE_CREATED_MESSAGE: &str = "Profile created successfully! Please log in to continue.";

pub struct CreateProfileUseCase {
    directory: Arc<dyn DirectoryService>,
}

impl CreateProfileUseCase {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, draft: ProfileDraft) -> Result<CreatedProfile, DomainError> {
        validate(&draft)?;

        let name = draft.name.trim().to_string();
        let email = draft.email.trim().to_string();
        // The directory has no profile fields of its own, so the form is
        // folded into the closest ones it does have.
        let user = NewDirectoryUser {
            name: name.clone(),
            email: email.clone(),
            username: email.clone(),
            company: Company {
                catch_phrase: draft.description.trim().to_string(),
            },
            address: Address {
                city: Some(draft.countries.trim().to_string()),
            },
        };

        let id = self.directory.create_user(&user).await?;
        info!("Created profile {} for {}", id, email);

        Ok(CreatedProfile {
            id,
            name,
            email,
            message: PROFILE_CREATED_MESSAGE.to_string(),
        })
    }
}

fn validate(draft: &ProfileDraft) -> Result<(), DomainError> {
    let required = [
        ("name", &draft.name),
        ("email", &draft.email),
        ("description", &draft.description),
        ("countries", &draft.countries),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!("{} is required", field)));
        }
    }
    if !draft.email.contains('@') {
        return Err(DomainError::Validation("email is not valid".to_string()));
    }
    Ok(())
}
