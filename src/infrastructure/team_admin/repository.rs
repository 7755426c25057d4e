//! Storage-backed team-admin association repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::team::TeamId;
use crate::domain::team_admin::{TeamAdmin, TeamAdminKey, TeamAdminRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamAdminRepository
#[derive(Debug)]
pub struct StorageTeamAdminRepository {
    storage: Arc<dyn Storage<TeamAdmin>>,
}

impl StorageTeamAdminRepository {
    pub fn new(storage: Arc<dyn Storage<TeamAdmin>>) -> Self {
        Self { storage }
    }

    async fn filtered<F>(&self, predicate: F) -> Result<Vec<TeamAdmin>, DomainError>
    where
        F: Fn(&TeamAdmin) -> bool + Send,
    {
        let mut associations: Vec<TeamAdmin> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|association| predicate(association))
            .collect();

        associations.sort_by(|a, b| {
            a.team_id()
                .as_str()
                .cmp(b.team_id().as_str())
                .then_with(|| a.admin_id().cmp(b.admin_id()))
        });

        Ok(associations)
    }
}

#[async_trait]
impl TeamAdminRepository for StorageTeamAdminRepository {
    async fn save(&self, association: TeamAdmin) -> Result<TeamAdmin, DomainError> {
        self.storage.save(association).await
    }

    async fn find_by_team_id(&self, team_id: &TeamId) -> Result<Vec<TeamAdmin>, DomainError> {
        self.filtered(|association| association.team_id() == team_id)
            .await
    }

    async fn find_by_admin_and_team(
        &self,
        admin_id: &str,
        team_id: &TeamId,
    ) -> Result<Option<TeamAdmin>, DomainError> {
        self.storage.get(&TeamAdminKey::new(team_id, admin_id)).await
    }

    async fn find_all_by_admin_id(&self, admin_id: &str) -> Result<Vec<TeamAdmin>, DomainError> {
        self.filtered(|association| association.admin_id() == admin_id)
            .await
    }

    async fn delete_by_team_id(&self, team_id: &TeamId) -> Result<usize, DomainError> {
        let mut removed = 0;

        for association in self.find_by_team_id(team_id).await? {
            if self.storage.delete(association.key()).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team_admin::TeamRole;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageTeamAdminRepository {
        let storage = Arc::new(InMemoryStorage::<TeamAdmin>::new());
        StorageTeamAdminRepository::new(storage)
    }

    fn team(id: &str) -> TeamId {
        TeamId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find_by_admin_and_team() {
        let repo = create_repo();
        repo.save(TeamAdmin::owner("alice", team("team-1")))
            .await
            .unwrap();

        let found = repo
            .find_by_admin_and_team("alice", &team("team-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.role(), TeamRole::Owner);

        let missing = repo
            .find_by_admin_and_team("bob", &team("team-1"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_same_pair() {
        let repo = create_repo();
        repo.save(TeamAdmin::new("alice", team("team-1"), TeamRole::Member, true))
            .await
            .unwrap();
        repo.save(TeamAdmin::owner("alice", team("team-1")))
            .await
            .unwrap();

        let all = repo.find_all_by_admin_id("alice").await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role(), TeamRole::Owner);
    }

    #[tokio::test]
    async fn test_find_all_by_admin_id_sorted_by_team() {
        let repo = create_repo();
        repo.save(TeamAdmin::owner("alice", team("team-c"))).await.unwrap();
        repo.save(TeamAdmin::owner("alice", team("team-a"))).await.unwrap();
        repo.save(TeamAdmin::owner("bob", team("team-b"))).await.unwrap();

        let teams: Vec<String> = repo
            .find_all_by_admin_id("alice")
            .await
            .unwrap()
            .iter()
            .map(|association| association.team_id().to_string())
            .collect();

        assert_eq!(teams, vec!["team-a", "team-c"]);
        assert!(repo.find_all_by_admin_id("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_team_id() {
        let repo = create_repo();
        repo.save(TeamAdmin::owner("alice", team("team-1"))).await.unwrap();
        repo.save(TeamAdmin::new("bob", team("team-1"), TeamRole::Member, true))
            .await
            .unwrap();
        repo.save(TeamAdmin::owner("carol", team("team-2"))).await.unwrap();

        let associations = repo.find_by_team_id(&team("team-1")).await.unwrap();
        let admins: Vec<&str> = associations.iter().map(|a| a.admin_id()).collect();

        assert_eq!(admins, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_delete_by_team_id() {
        let repo = create_repo();
        repo.save(TeamAdmin::owner("alice", team("team-1"))).await.unwrap();
        repo.save(TeamAdmin::new("bob", team("team-1"), TeamRole::Member, true))
            .await
            .unwrap();
        repo.save(TeamAdmin::owner("alice", team("team-2"))).await.unwrap();

        let removed = repo.delete_by_team_id(&team("team-1")).await.unwrap();

        assert_eq!(removed, 2);
        assert!(repo.find_by_team_id(&team("team-1")).await.unwrap().is_empty());
        assert_eq!(repo.find_all_by_admin_id("alice").await.unwrap().len(), 1);
    }
}
