//! Fixed demonstration sequence against a ready users server.
//!
//! Each step states the outcome it expects. A deviation is logged at WARN and
//! counted in the summary; only an unreachable server aborts the run.

use rpc::users::v1::{CreateUserRequest, DeleteUserRequest, GetUsersRequest, User};
use thiserror::Error;
use tonic::{Code, Status};
use tracing::{info, warn};

use crate::client::UsersGrpcClient;

/// Users created in step 1
pub const DEMO_USERS: [(&str, &str); 3] = [
    ("Marko Petrović", "marko.petrovic@example.com"),
    ("Ana Jovanović", "ana.jovanovic@example.com"),
    ("Nikola Nikolić", "nikola.nikolic@example.com"),
];

/// Id that no demo run ever creates
pub const MISSING_USER_ID: i32 = 999_999;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("users service unavailable during '{step}': {message}")]
    Unavailable { step: String, message: String },
}

/// Outcome of one demonstration step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Default, Clone)]
pub struct DemoSummary {
    pub steps: Vec<StepOutcome>,
}

impl DemoSummary {
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    fn record(&mut self, step: impl Into<String>, passed: bool, detail: impl Into<String>) {
        let outcome = StepOutcome {
            step: step.into(),
            passed,
            detail: detail.into(),
        };

        if outcome.passed {
            info!(step = %outcome.step, "{}", outcome.detail);
        } else {
            warn!(step = %outcome.step, "Unexpected outcome: {}", outcome.detail);
        }
        self.steps.push(outcome);
    }
}

struct Demo {
    client: UsersGrpcClient,
    summary: DemoSummary,
}

/// Abort on transport failure, hand every other status back to the step
fn check_transport(step: &str, status: Status) -> Result<Status, DemoError> {
    if status.code() == Code::Unavailable {
        return Err(DemoError::Unavailable {
            step: step.to_string(),
            message: status.message().to_string(),
        });
    }
    Ok(status)
}

fn describe(status: &Status) -> String {
    format!("{:?}: {}", status.code(), status.message())
}

impl Demo {
    async fn create(
        &mut self,
        step: &str,
        name: &str,
        email: &str,
    ) -> Result<Result<User, Status>, DemoError> {
        let result = self
            .client
            .create_user(CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await;

        match result {
            Ok(response) => match response.into_inner().user {
                Some(user) => Ok(Ok(user)),
                None => Ok(Err(Status::internal("response carried no user"))),
            },
            Err(status) => check_transport(step, status).map(Err),
        }
    }

    async fn list(
        &mut self,
        step: &str,
        name_filter: Option<&str>,
    ) -> Result<Result<Vec<User>, Status>, DemoError> {
        let result = self
            .client
            .get_users(GetUsersRequest {
                name_filter: name_filter.map(str::to_string),
            })
            .await;

        match result {
            Ok(response) => Ok(Ok(response.into_inner().users)),
            Err(status) => check_transport(step, status).map(Err),
        }
    }

    async fn delete(&mut self, step: &str, id: i32) -> Result<Result<String, Status>, DemoError> {
        match self.client.delete_user(DeleteUserRequest { id }).await {
            Ok(response) => Ok(Ok(response.into_inner().message)),
            Err(status) => check_transport(step, status).map(Err),
        }
    }

    /// Create a user that should be new; an earlier run may have left it behind
    async fn create_demo_user(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, DemoError> {
        let step = format!("create {}", name);

        match self.create(&step, name, email).await? {
            Ok(user) => {
                self.summary
                    .record(&step, true, format!("Created user {} ({})", user.id, user.email));
                Ok(Some(user))
            }
            Err(status) if status.code() == Code::AlreadyExists => {
                self.summary
                    .record(&step, true, format!("{} already exists from an earlier run", email));
                Ok(None)
            }
            Err(status) => {
                self.summary.record(&step, false, describe(&status));
                Ok(None)
            }
        }
    }

    /// Create expected to fail with `expected`
    async fn create_rejected(
        &mut self,
        step: &str,
        name: &str,
        email: &str,
        expected: Code,
    ) -> Result<(), DemoError> {
        match self.create(step, name, email).await? {
            Ok(user) => {
                self.summary.record(
                    step,
                    false,
                    format!("expected {:?}, but user {} was created", expected, user.id),
                );
            }
            Err(status) if status.code() == expected => {
                self.summary
                    .record(step, true, format!("Rejected as expected ({})", describe(&status)));
            }
            Err(status) => {
                self.summary.record(
                    step,
                    false,
                    format!("expected {:?}, got {}", expected, describe(&status)),
                );
            }
        }
        Ok(())
    }

    /// Find a user's id through an unfiltered list
    async fn find_id_by_email(
        &mut self,
        step: &str,
        email: &str,
    ) -> Result<Option<i32>, DemoError> {
        Ok(match self.list(step, None).await? {
            Ok(users) => users.into_iter().find(|u| u.email == email).map(|u| u.id),
            Err(_) => None,
        })
    }

    async fn run(mut self) -> Result<DemoSummary, DemoError> {
        // 1. Create the demo users
        let mut created = Vec::with_capacity(DEMO_USERS.len());
        for (name, email) in DEMO_USERS {
            created.push(self.create_demo_user(name, email).await?);
        }

        // 2. Duplicate email differing only in case
        let (first_name, first_email) = DEMO_USERS[0];
        self.create_rejected(
            "create duplicate email",
            first_name,
            &first_email.to_uppercase(),
            Code::AlreadyExists,
        )
        .await?;

        // 3. Malformed email
        self.create_rejected(
            "create invalid email",
            "Invalid Email",
            "not-an-email",
            Code::InvalidArgument,
        )
        .await?;

        // 4. Empty name
        self.create_rejected(
            "create empty name",
            "",
            "empty.name@example.com",
            Code::InvalidArgument,
        )
        .await?;

        // 5. List everyone, then filter by "nik"
        match self.list("list all", None).await? {
            Ok(users) => {
                let ordered = users.windows(2).all(|w| w[0].id < w[1].id);
                let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
                self.summary.record(
                    "list all",
                    ordered,
                    format!("{} users in id order: {:?}", users.len(), names),
                );
            }
            Err(status) => self.summary.record("list all", false, describe(&status)),
        }

        match self.list("list filter nik", Some("nik")).await? {
            Ok(users) => {
                let matching = !users.is_empty()
                    && users.iter().all(|u| u.name.to_lowercase().contains("nik"));
                let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
                self.summary
                    .record("list filter nik", matching, format!("Matched {:?}", names));
            }
            Err(status) => self.summary.record("list filter nik", false, describe(&status)),
        }

        // 6. Delete Ana, then make sure she is gone
        let (_, ana_email) = DEMO_USERS[1];
        let ana_id = match created[1].as_ref() {
            Some(user) => Some(user.id),
            None => self.find_id_by_email("find Ana", ana_email).await?,
        };

        match ana_id {
            Some(id) => match self.delete("delete Ana", id).await? {
                Ok(message) => self.summary.record("delete Ana", true, message),
                Err(status) => self.summary.record("delete Ana", false, describe(&status)),
            },
            None => self
                .summary
                .record("delete Ana", false, format!("no user with email {}", ana_email)),
        }

        match self.list("list filter Ana", Some("Ana")).await? {
            Ok(users) => {
                let detail = format!("{} users match \"Ana\"", users.len());
                self.summary.record("list filter Ana", users.is_empty(), detail);
            }
            Err(status) => self.summary.record("list filter Ana", false, describe(&status)),
        }

        // 7. Delete an id that does not exist
        match self.delete("delete missing", MISSING_USER_ID).await? {
            Ok(message) => self.summary.record(
                "delete missing",
                false,
                format!("expected NotFound, got success: {}", message),
            ),
            Err(status) => {
                let passed = status.code() == Code::NotFound;
                self.summary.record("delete missing", passed, describe(&status));
            }
        }

        info!(
            steps = self.summary.total(),
            failed = self.summary.failed(),
            "Demonstration finished"
        );
        Ok(self.summary)
    }
}

/// Run the demonstration sequence
///
/// # Errors
///
/// Returns [`DemoError::Unavailable`] as soon as any call fails with
/// `UNAVAILABLE`; every other outcome is recorded in the summary.
pub async fn run_demo(client: UsersGrpcClient) -> Result<DemoSummary, DemoError> {
    Demo {
        client,
        summary: DemoSummary::default(),
    }
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = DemoSummary::default();
        summary.record("a", true, "ok");
        summary.record("b", false, "boom");

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_check_transport() {
        let err =
            check_transport("list all", Status::unavailable("connection refused")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "users service unavailable during 'list all': connection refused"
        );

        let status = check_transport("list all", Status::not_found("nope")).unwrap();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[test]
    fn test_demo_users_are_valid_and_distinct() {
        let mut emails: Vec<&str> = DEMO_USERS.iter().map(|(_, e)| *e).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 3);
        assert!(DEMO_USERS[2].0.to_lowercase().contains("nik"));
        assert!(!DEMO_USERS[0].0.to_lowercase().contains("nik"));
    }
}
