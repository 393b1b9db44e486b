use crate::{
    client::{api::PortfolioClient, errors::ClientError},
    entities::{
        contact::{ContactRequest, MISSING_CONTACT_FIELDS},
        project::{NewProject, Project, MISSING_PROJECT_FIELDS},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Modal for adding a project by hand.
#[derive(Debug, Clone, Default)]
pub struct AddProjectForm {
    phase: FormPhase,
    values: NewProject,
    error: Option<String>,
}

impl AddProjectForm {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn values(&self) -> &NewProject {
        &self.values
    }

    /// Inputs are read-only while a submission is in flight.
    pub fn values_mut(&mut self) -> Option<&mut NewProject> {
        (self.phase == FormPhase::Open).then_some(&mut self.values)
    }

    pub fn open(&mut self) {
        if self.phase == FormPhase::Closed {
            self.phase = FormPhase::Open;
            self.error = None;
        }
    }

    pub fn close(&mut self) {
        if self.phase == FormPhase::Open {
            self.phase = FormPhase::Closed;
            self.error = None;
        }
    }

    /// Moves to `Submitting` and hands out the payload, or stays open with
    /// an inline error when required fields are blank.
    pub fn begin_submit(&mut self) -> Option<NewProject> {
        if self.phase != FormPhase::Open {
            return None;
        }
        if blank(&self.values.title) || blank(&self.values.description) {
            self.error = Some(MISSING_PROJECT_FIELDS.to_string());
            return None;
        }

        self.phase = FormPhase::Submitting;
        self.error = None;
        Some(self.values.clone())
    }

    /// Success prepends the new project and resets the form; failure
    /// reopens it with the values intact.
    pub fn finish(&mut self, result: Result<Project, ClientError>, projects: &mut Vec<Project>) {
        if self.phase != FormPhase::Submitting {
            return;
        }

        match result {
            Ok(project) => {
                projects.insert(0, project);
                self.values = NewProject::default();
                self.phase = FormPhase::Closed;
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = FormPhase::Open;
            }
        }
    }

    pub async fn submit(&mut self, client: &PortfolioClient, projects: &mut Vec<Project>) {
        if let Some(payload) = self.begin_submit() {
            let result = client.create_project(&payload).await;
            self.finish(result, projects);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactPhase {
    #[default]
    Editing,
    Sending,
    Sent,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    phase: ContactPhase,
    values: ContactRequest,
    error: Option<String>,
}

impl ContactForm {
    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn values(&self) -> &ContactRequest {
        &self.values
    }

    pub fn values_mut(&mut self) -> Option<&mut ContactRequest> {
        (self.phase != ContactPhase::Sending).then_some(&mut self.values)
    }

    pub fn begin_send(&mut self) -> Option<ContactRequest> {
        if self.phase == ContactPhase::Sending {
            return None;
        }
        if blank(&self.values.name) || blank(&self.values.email) || blank(&self.values.message) {
            self.error = Some(MISSING_CONTACT_FIELDS.to_string());
            return None;
        }

        self.phase = ContactPhase::Sending;
        self.error = None;
        Some(self.values.clone())
    }

    pub fn finish(&mut self, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                self.values = ContactRequest::default();
                self.phase = ContactPhase::Sent;
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = ContactPhase::Editing;
            }
        }
    }

    pub async fn send(&mut self, client: &PortfolioClient) {
        if let Some(payload) = self.begin_send() {
            let result = client.send_contact(&payload).await.map(|_| ());
            self.finish(result);
        }
    }
}
