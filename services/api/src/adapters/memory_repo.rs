//! services/api/src/adapters/memory_repo.rs
//!
//! An in-memory implementation of the `ProjectRepository` port, seeded with the
//! demo clients and project shown on the client dashboard.

use agency_core::{
    domain::{
        Client, Feedback, MessageAuthorKind, Milestone, MilestoneStatus, Project, ProjectFile,
        ProjectMessage, TeamMember,
    },
    ports::{PortError, PortResult, ProjectRepository},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    clients: HashMap<String, Client>,
    projects: HashMap<String, Project>,
    feedback: Vec<Feedback>,
}

/// Client, project and feedback records held behind a single lock.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    store: RwLock<Store>,
}

impl InMemoryProjectRepository {
    pub fn new(clients: Vec<Client>, projects: Vec<Project>) -> Self {
        let store = Store {
            clients: clients.into_iter().map(|c| (c.id.clone(), c)).collect(),
            projects: projects.into_iter().map(|p| (p.id.clone(), p)).collect(),
            feedback: Vec::new(),
        };
        Self {
            store: RwLock::new(store),
        }
    }

    /// The two demo clients and the one project that has been set up for them.
    pub fn seeded() -> Self {
        Self::new(demo_clients(), vec![demo_project()])
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_client_by_email(&self, email: &str) -> PortResult<Client> {
        let store = self.store.read().await;
        store
            .clients
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("client with email {}", email)))
    }

    async fn get_project(&self, project_id: &str) -> PortResult<Project> {
        let store = self.store.read().await;
        store
            .projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("project {}", project_id)))
    }

    async fn add_feedback(&self, feedback: Feedback) -> PortResult<Feedback> {
        let mut store = self.store.write().await;

        let author = store
            .clients
            .get(&feedback.client_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Client".to_string());

        if let Some(project) = store.projects.get_mut(&feedback.project_id) {
            project.messages.insert(
                0,
                ProjectMessage {
                    id: format!("msg_{}", Uuid::new_v4().simple()),
                    author,
                    content: feedback.message.clone(),
                    timestamp: feedback.timestamp,
                    kind: MessageAuthorKind::Client,
                },
            );
        }

        info!(project_id = %feedback.project_id, "Recorded client feedback");
        store.feedback.push(feedback.clone());
        Ok(feedback)
    }

}

//=========================================================================================
// Demo Records
//=========================================================================================

fn demo_clients() -> Vec<Client> {
    vec![
        Client {
            id: "client_001".to_string(),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "demo123".to_string(),
            project_id: "proj_001".to_string(),
            avatar: "JD".to_string(),
        },
        Client {
            id: "client_002".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            password: "demo456".to_string(),
            project_id: "proj_002".to_string(),
            avatar: "JS".to_string(),
        },
    ]
}

fn member(name: &str, role: &str, email: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        email: email.to_string(),
    }
}

fn milestone(
    id: &str,
    date: &str,
    title: &str,
    status: MilestoneStatus,
    description: &str,
) -> Milestone {
    Milestone {
        id: id.to_string(),
        date: date.to_string(),
        title: title.to_string(),
        status,
        description: description.to_string(),
    }
}

fn demo_project() -> Project {
    let now = Utc::now();
    Project {
        id: "proj_001".to_string(),
        client_id: "client_001".to_string(),
        name: "E-commerce Website Redesign".to_string(),
        status: "in-progress".to_string(),
        progress: 65,
        budget: "$15,000".to_string(),
        deadline: "September 15, 2025".to_string(),
        created_at: "2025-08-20".to_string(),
        team: vec![
            member("Sarah Chen", "Project Manager", "sarah@webagency.com"),
            member("Mike Torres", "Developer", "mike@webagency.com"),
            member("Lisa Wang", "Designer", "lisa@webagency.com"),
        ],
        milestones: vec![
            milestone(
                "m1",
                "2025-08-20",
                "Project Kickoff",
                MilestoneStatus::Completed,
                "Initial requirements gathering and project planning completed",
            ),
            milestone(
                "m2",
                "2025-08-22",
                "Design Mockups",
                MilestoneStatus::Completed,
                "UI/UX designs approved by client",
            ),
            milestone(
                "m3",
                "2025-08-25",
                "Development Phase",
                MilestoneStatus::InProgress,
                "Frontend development in progress, backend API implementation underway",
            ),
            milestone(
                "m4",
                "2025-09-01",
                "Testing Phase",
                MilestoneStatus::Pending,
                "Quality assurance and user testing",
            ),
            milestone(
                "m5",
                "2025-09-15",
                "Launch",
                MilestoneStatus::Pending,
                "Final deployment and go-live",
            ),
        ],
        messages: vec![
            ProjectMessage {
                id: "msg1".to_string(),
                author: "Sarah Chen (Project Manager)".to_string(),
                content: "Hi John! The shopping cart feature is ready for your review. Please check the staging environment and let us know your feedback.".to_string(),
                timestamp: now - Duration::hours(2),
                kind: MessageAuthorKind::Team,
            },
            ProjectMessage {
                id: "msg2".to_string(),
                author: "Mike Torres (Developer)".to_string(),
                content: "Payment integration is progressing well. We'll have Stripe and PayPal options ready by Friday.".to_string(),
                timestamp: now - Duration::days(1),
                kind: MessageAuthorKind::Team,
            },
        ],
        files: vec![
            ProjectFile {
                id: "file1".to_string(),
                name: "Project Requirements Document.pdf".to_string(),
                kind: "document".to_string(),
                upload_date: "2025-08-20".to_string(),
                size: Some("2.3 MB".to_string()),
                url: None,
            },
            ProjectFile {
                id: "file2".to_string(),
                name: "UI Mockups - Final Version.figma".to_string(),
                kind: "design".to_string(),
                upload_date: "2025-08-22".to_string(),
                size: Some("5.1 MB".to_string()),
                url: None,
            },
            ProjectFile {
                id: "file3".to_string(),
                name: "Staging Environment Link".to_string(),
                kind: "link".to_string(),
                upload_date: "2025-08-25".to_string(),
                size: None,
                url: Some("https://staging.johndoe-ecommerce.com".to_string()),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(project_id: &str, client_id: &str, message: &str) -> Feedback {
        Feedback {
            id: "feedback_test".to_string(),
            project_id: project_id.to_string(),
            client_id: client_id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            status: "new".to_string(),
        }
    }

    #[tokio::test]
    async fn looks_up_seeded_records() {
        let repo = InMemoryProjectRepository::seeded();

        let client = repo.find_client_by_email("john.doe@example.com").await.unwrap();
        assert_eq!(client.id, "client_001");
        assert_eq!(repo.get_project("proj_001").await.unwrap().progress, 65);
        assert!(matches!(
            repo.get_project("proj_002").await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn feedback_is_prepended_to_project_messages() {
        let repo = InMemoryProjectRepository::seeded();
        repo.add_feedback(feedback("proj_001", "client_001", "Looks great!"))
            .await
            .unwrap();

        let project = repo.get_project("proj_001").await.unwrap();
        assert_eq!(project.messages.len(), 3);
        assert_eq!(project.messages[0].author, "John Doe");
        assert_eq!(project.messages[0].kind, MessageAuthorKind::Client);
        assert_eq!(repo.store.read().await.feedback.len(), 1);
    }

    #[tokio::test]
    async fn feedback_for_unknown_project_is_still_recorded() {
        let repo = InMemoryProjectRepository::seeded();
        repo.add_feedback(feedback("proj_404", "client_404", "Hello"))
            .await
            .unwrap();

        let store = repo.store.read().await;
        assert_eq!(store.feedback.len(), 1);
        assert_eq!(store.feedback[0].project_id, "proj_404");
    }
}
