//! Shared fixtures for API integration tests.
//!
//! The router under test is the real one; only the repositories are
//! replaced, with in-memory stores over a shared mutex-guarded state.
//! Derived counts are computed from the membership set on every read,
//! the same way the SQL stores compute them per row.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use community_compass::api::{create_router, AppState};
use community_compass::domain::{CommunityGroup, CommunityType, Membership, Resource, ResourceType, User};
use community_compass::errors::{AppError, AppResult, EntityKind};
use community_compass::infra::repositories::{
    CommunityRepository, MembershipRepository, ResourceRepository, UserRepository,
};
use community_compass::infra::Database;
use community_compass::services::{
    CommunityManager, MembershipManager, ResourceManager, Services, UserManager,
};

#[derive(Default)]
struct DirectoryState {
    users: HashMap<i32, User>,
    groups: HashMap<i32, CommunityGroup>,
    resources: HashMap<i32, Resource>,
    memberships: HashSet<(i32, i32)>,
    next_user_id: i32,
    next_group_id: i32,
    next_resource_id: i32,
}

impl DirectoryState {
    fn community_count(&self, user_id: i32) -> i64 {
        self.memberships.iter().filter(|(u, _)| *u == user_id).count() as i64
    }

    fn user_count(&self, community_id: i32) -> i64 {
        self.memberships
            .iter()
            .filter(|(_, c)| *c == community_id)
            .count() as i64
    }
}

type Shared = Arc<Mutex<DirectoryState>>;

struct InMemoryUsers {
    state: Shared,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&id).map(|user| {
            let mut user = user.clone();
            user.set_community_count(state.community_count(id));
            user
        }))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|u| u.id());
        for user in &mut users {
            user.set_community_count(state.community_count(user.id()));
        }
        Ok(users)
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        let mut stored = user.clone();
        if user.is_persisted() {
            if !state.users.contains_key(&user.id()) {
                return Err(AppError::Database(sea_orm::DbErr::RecordNotUpdated));
            }
        } else {
            state.next_user_id += 1;
            stored = User::from_storage(
                state.next_user_id,
                user.name().to_string(),
                user.email().to_string(),
                user.age(),
                user.sex(),
                user.latitude(),
                user.longitude(),
                user.created_at(),
                user.updated_at(),
                0,
            );
        }
        state.users.insert(stored.id(), stored.clone());
        stored.set_community_count(state.community_count(stored.id()));
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.users.remove(&id).is_none() {
            return Err(AppError::NotFound(EntityKind::User));
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().users.contains_key(&id))
    }
}

struct InMemoryCommunities {
    state: Shared,
}

#[async_trait]
impl CommunityRepository for InMemoryCommunities {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CommunityGroup>> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.get(&id).map(|group| {
            let mut group = group.clone();
            group.set_user_count(state.user_count(id));
            group
        }))
    }

    async fn find_all(&self) -> AppResult<Vec<CommunityGroup>> {
        let state = self.state.lock().unwrap();
        let mut groups: Vec<CommunityGroup> = state.groups.values().cloned().collect();
        groups.sort_by_key(|g| g.id());
        for group in &mut groups {
            group.set_user_count(state.user_count(group.id()));
        }
        Ok(groups)
    }

    async fn find_by_type(&self, community_type: CommunityType) -> AppResult<Vec<CommunityGroup>> {
        let groups = self.find_all().await?;
        Ok(groups
            .into_iter()
            .filter(|g| g.community_type() == community_type)
            .collect())
    }

    async fn save(&self, group: &CommunityGroup) -> AppResult<CommunityGroup> {
        let mut state = self.state.lock().unwrap();
        let mut stored = group.clone();
        if group.is_persisted() {
            if !state.groups.contains_key(&group.id()) {
                return Err(AppError::Database(sea_orm::DbErr::RecordNotUpdated));
            }
        } else {
            state.next_group_id += 1;
            stored = CommunityGroup::from_storage(
                state.next_group_id,
                group.name().to_string(),
                group.community_type(),
                group.latitude(),
                group.longitude(),
                group.capacity(),
                group.description().map(str::to_string),
                group.created_at(),
                group.updated_at(),
                0,
            );
        }
        state.groups.insert(stored.id(), stored.clone());
        stored.set_user_count(state.user_count(stored.id()));
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.groups.remove(&id).is_none() {
            return Err(AppError::NotFound(EntityKind::CommunityGroup));
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().groups.contains_key(&id))
    }
}

struct InMemoryResources {
    state: Shared,
}

#[async_trait]
impl ResourceRepository for InMemoryResources {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Resource>> {
        Ok(self.state.lock().unwrap().resources.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Resource>> {
        let state = self.state.lock().unwrap();
        let mut resources: Vec<Resource> = state.resources.values().cloned().collect();
        resources.sort_by_key(|r| r.id());
        Ok(resources)
    }

    async fn find_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>> {
        let resources = self.find_all().await?;
        Ok(resources
            .into_iter()
            .filter(|r| r.resource_type() == resource_type)
            .collect())
    }

    async fn save(&self, resource: &Resource) -> AppResult<Resource> {
        let mut state = self.state.lock().unwrap();
        let stored = if resource.is_persisted() {
            if !state.resources.contains_key(&resource.id()) {
                return Err(AppError::Database(sea_orm::DbErr::RecordNotUpdated));
            }
            resource.clone()
        } else {
            state.next_resource_id += 1;
            Resource::from_storage(
                state.next_resource_id,
                resource.name().to_string(),
                resource.resource_type(),
                resource.latitude(),
                resource.longitude(),
                resource.hours().to_string(),
                resource.description().map(str::to_string),
                resource.created_at(),
                resource.updated_at(),
            )
        };
        state.resources.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.resources.remove(&id).is_none() {
            return Err(AppError::NotFound(EntityKind::Resource));
        }
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().resources.contains_key(&id))
    }
}

struct InMemoryMemberships {
    state: Shared,
}

#[async_trait]
impl MembershipRepository for InMemoryMemberships {
    async fn find_pair(&self, user_id: i32, community_id: i32) -> AppResult<Option<Membership>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .memberships
            .contains(&(user_id, community_id))
            .then(|| Membership::new(user_id, community_id)))
    }

    async fn pair_exists(&self, user_id: i32, community_id: i32) -> AppResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .memberships
            .contains(&(user_id, community_id)))
    }

    async fn save(&self, membership: &Membership) -> AppResult<Membership> {
        self.state
            .lock()
            .unwrap()
            .memberships
            .insert((membership.user_id, membership.community_id));
        Ok(*membership)
    }

    async fn delete_pair(&self, user_id: i32, community_id: i32) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .memberships
            .remove(&(user_id, community_id));
        Ok(())
    }

    async fn delete_for_user(&self, user_id: i32) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.memberships.len();
        state.memberships.retain(|(u, _)| *u != user_id);
        Ok((before - state.memberships.len()) as u64)
    }

    async fn delete_for_community(&self, community_id: i32) -> AppResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.memberships.len();
        state.memberships.retain(|(_, c)| *c != community_id);
        Ok((before - state.memberships.len()) as u64)
    }

    async fn count_for_user(&self, user_id: i32) -> AppResult<i64> {
        Ok(self.state.lock().unwrap().community_count(user_id))
    }

    async fn count_for_community(&self, community_id: i32) -> AppResult<i64> {
        Ok(self.state.lock().unwrap().user_count(community_id))
    }
}

/// Build the application router over empty in-memory stores.
pub fn test_app() -> Router {
    let state: Shared = Arc::new(Mutex::new(DirectoryState::default()));

    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUsers {
        state: state.clone(),
    });
    let communities: Arc<dyn CommunityRepository> = Arc::new(InMemoryCommunities {
        state: state.clone(),
    });
    let resources: Arc<dyn ResourceRepository> = Arc::new(InMemoryResources {
        state: state.clone(),
    });
    let memberships: Arc<dyn MembershipRepository> = Arc::new(InMemoryMemberships { state });

    let membership_service = Arc::new(MembershipManager::new(
        users.clone(),
        communities.clone(),
        memberships,
    ));
    let services = Services::new(
        Arc::new(UserManager::new(users, membership_service.clone())),
        Arc::new(CommunityManager::new(
            communities,
            membership_service.clone(),
        )),
        Arc::new(ResourceManager::new(resources)),
        membership_service,
    );

    let database = Arc::new(Database::from_connection(DatabaseConnection::default()));
    create_router(AppState::from_services(&services, database))
}

/// Send a GET request and parse the JSON response.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a bodyless POST request and parse the JSON response.
pub async fn post(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a DELETE request and parse the JSON response.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a request with a JSON body and parse the JSON response.
pub async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}
