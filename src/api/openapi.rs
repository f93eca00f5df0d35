//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    community_handler, membership_handler, resource_handler, user_handler, UpdateAttributeRequest,
};
use crate::domain::{
    CommunityGroup, CommunityType, NewCommunityGroup, NewResource, NewUser, Resource, ResourceType,
    Sex, User,
};
use crate::types::MessageResponse;

/// OpenAPI documentation for Community Compass
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Community Compass",
        version = "0.1.0",
        description = "A location-aware directory of users, community groups, and public resources",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Community group endpoints
        community_handler::list_communities,
        community_handler::closest_community,
        community_handler::get_community,
        community_handler::create_community,
        community_handler::update_community,
        community_handler::delete_community,
        // Resource endpoints
        resource_handler::list_resources,
        resource_handler::closest_resource,
        resource_handler::get_resource,
        resource_handler::create_resource,
        resource_handler::update_resource,
        resource_handler::delete_resource,
        // Membership endpoints
        membership_handler::add_member,
        membership_handler::remove_member,
    ),
    components(
        schemas(
            // Domain types
            User,
            Sex,
            NewUser,
            CommunityGroup,
            CommunityType,
            NewCommunityGroup,
            Resource,
            ResourceType,
            NewResource,
            // Request and response types
            UpdateAttributeRequest,
            MessageResponse,
        )
    ),
    tags(
        (name = "Users", description = "User directory operations"),
        (name = "Communities", description = "Community group directory operations"),
        (name = "Resources", description = "Public resource directory operations"),
        (name = "Membership", description = "User enrollment in community groups")
    )
)]
pub struct ApiDoc;
