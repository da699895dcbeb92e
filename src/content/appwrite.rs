// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Appwrite REST client.
//!
//! Implements the content and identity collaborators on top of Appwrite's
//! database and account endpoints. Sessions use Appwrite's fallback cookie
//! scheme for non-browser clients: the sign-in response carries an
//! `X-Fallback-Cookies` header which is replayed on every later request.

use std::time::Duration;

use reqwest::{
    Method, StatusCode,
    blocking::{Client, RequestBuilder, Response},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    config::BackendConfig,
    content::{ContentService, IdentityService},
    errors::{AuthError, FetchError},
    model::{Creator, ItemId, MediaCollection, MediaItem, UserProfile},
};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const FALLBACK_COOKIES_HEADER: &str = "X-Fallback-Cookies";

/// Appwrite query expressions, serialised in the JSON query syntax.
#[derive(Debug)]
enum Query {
    OrderDesc(&'static str),
    Limit(usize),
    Equal(&'static str, String),
    Search(&'static str, String),
}

impl Query {
    fn to_json(&self) -> String {
        let value = match self {
            Query::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
            Query::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
            Query::Equal(attribute, value) => {
                json!({ "method": "equal", "attribute": attribute, "values": [value] })
            }
            Query::Search(attribute, value) => {
                json!({ "method": "search", "attribute": attribute, "values": [value] })
            }
        };
        value.to_string()
    }
}

#[derive(Deserialize)]
struct DocumentList<T> {
    documents: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct VideoDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnail: String,
    video: String,
    creator: Option<UserDocument>,
}

#[derive(Deserialize)]
struct UserDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "accountId", default)]
    account_id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    followers: Option<u64>,
}

#[derive(Deserialize)]
struct Account {
    #[serde(rename = "$id")]
    id: String,
}

impl From<VideoDocument> for MediaItem {
    fn from(doc: VideoDocument) -> Self {
        let creator = match doc.creator {
            Some(user) => Creator {
                id: user.id,
                display_name: user.username,
                avatar_uri: user.avatar,
            },
            None => Creator {
                id: String::new(),
                display_name: "unknown".to_string(),
                avatar_uri: String::new(),
            },
        };

        Self {
            id: ItemId::from(doc.id),
            title: doc.title,
            thumbnail_uri: doc.thumbnail,
            video_uri: doc.video,
            creator,
        }
    }
}

impl From<UserDocument> for UserProfile {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            account_id: doc.account_id,
            username: doc.username,
            email: doc.email,
            avatar_uri: doc.avatar,
            followers: doc.followers,
        }
    }
}

pub(crate) struct AppwriteClient {
    http: Client,
    config: BackendConfig,
    cookies: Option<String>,
}

impl AppwriteClient {
    pub(crate) fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            cookies: None,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path);
        let builder = self
            .http
            .request(method, url)
            .header(PROJECT_HEADER, &self.config.project_id);

        match &self.cookies {
            Some(cookies) => builder.header(FALLBACK_COOKIES_HEADER, cookies),
            None => builder,
        }
    }

    fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<T>, FetchError> {
        let path = format!(
            "databases/{}/collections/{}/documents",
            self.config.database_id, collection_id
        );
        let params: Vec<(&str, String)> = queries.iter().map(|q| ("queries[]", q.to_json())).collect();

        debug!(%path, ?queries, "listing documents");
        let response = check_status(self.request(Method::GET, &path).query(&params).send()?)?;
        let list: DocumentList<T> = response
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(list.documents)
    }

    fn list_videos(&self, queries: &[Query]) -> Result<MediaCollection, FetchError> {
        let documents: Vec<VideoDocument> = self.list_documents(&self.config.video_collection_id, queries)?;
        Ok(MediaCollection::new(documents.into_iter().map(MediaItem::from).collect()))
    }
}

fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(FetchError::Status {
        status: status.as_u16(),
        message,
    })
}

impl ContentService for AppwriteClient {
    fn list_feed_items(&self) -> Result<MediaCollection, FetchError> {
        self.list_videos(&[Query::OrderDesc("$createdAt")])
    }

    fn list_trending_items(&self, limit: usize) -> Result<MediaCollection, FetchError> {
        self.list_videos(&[Query::OrderDesc("$createdAt"), Query::Limit(limit)])
    }

    fn list_user_items(&self, user_id: &str) -> Result<MediaCollection, FetchError> {
        self.list_videos(&[
            Query::Equal("creator", user_id.to_string()),
            Query::OrderDesc("$createdAt"),
        ])
    }

    fn search_items(&self, query: &str) -> Result<MediaCollection, FetchError> {
        self.list_videos(&[Query::Search("title", query.to_string())])
    }
}

impl IdentityService for AppwriteClient {
    fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        if self.cookies.is_none() {
            return Ok(None);
        }

        let response = self.request(Method::GET, "account").send()?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let account: Account = check_status(response)?
            .json()
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        let users: Vec<UserDocument> = self.list_documents(
            &self.config.user_collection_id,
            &[Query::Equal("accountId", account.id.clone())],
        )?;

        match users.into_iter().next() {
            Some(user) => Ok(Some(user.into())),
            None => Err(AuthError::ProfileMissing(account.id)),
        }
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .request(Method::POST, "account/sessions/email")
            .json(&json!({ "email": email, "password": password }))
            .send()?;
        let response = check_status(response)?;

        let cookies = response
            .headers()
            .get(FALLBACK_COOKIES_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AuthError::Decode("sign-in response carried no session".to_string()))?;
        self.cookies = Some(cookies.to_string());
        info!("signed in as {email}");

        self.current_user()?.ok_or(AuthError::Unauthorized)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        let result = self
            .request(Method::DELETE, "account/sessions/current")
            .send()
            .map_err(AuthError::from)
            .and_then(|response| check_status(response).map_err(AuthError::from));

        // The local session is gone regardless of what the backend said.
        self.cookies = None;
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    const VIDEOS_PATH: &str = "/databases/db/collections/videos/documents";
    const USERS_PATH: &str = "/databases/db/collections/users/documents";

    fn client(server: &Server) -> AppwriteClient {
        let config = BackendConfig {
            endpoint: server.url(),
            project_id: "aora".into(),
            database_id: "db".into(),
            video_collection_id: "videos".into(),
            user_collection_id: "users".into(),
            request_timeout_secs: 5,
        };
        AppwriteClient::new(&config).unwrap()
    }

    fn videos_body() -> String {
        json!({
            "total": 2,
            "documents": [
                {
                    "$id": "v1",
                    "title": "Get inspired to code",
                    "thumbnail": "https://cdn.test/v1.png",
                    "video": "https://cdn.test/v1.mp4",
                    "prompt": "neon city",
                    "creator": { "$id": "u1", "username": "jsmastery", "avatar": "https://cdn.test/u1.png" }
                },
                {
                    "$id": "v2",
                    "title": "Orphaned",
                    "thumbnail": "https://cdn.test/v2.png",
                    "video": "https://cdn.test/v2.mp4",
                    "creator": null
                }
            ]
        })
        .to_string()
    }

    fn user_body() -> String {
        json!({
            "total": 1,
            "documents": [{
                "$id": "u1",
                "accountId": "acc-1",
                "username": "jsmastery",
                "email": "js@test.dev",
                "avatar": "https://cdn.test/u1.png"
            }]
        })
        .to_string()
    }

    #[test]
    fn feed_items_map_documents_to_media_items() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", VIDEOS_PATH)
            .match_header("x-appwrite-project", "aora")
            .match_query(Matcher::UrlEncoded(
                "queries[]".into(),
                r#"{"attribute":"$createdAt","method":"orderDesc"}"#.into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(videos_body())
            .create();

        let items = client(&server).list_feed_items().unwrap();
        mock.assert();

        assert_eq!(items.len(), 2);
        let first = items.get(0).unwrap();
        assert_eq!(first.id.as_str(), "v1");
        assert_eq!(first.video_uri, "https://cdn.test/v1.mp4");
        assert_eq!(first.creator.display_name, "jsmastery");
        assert_eq!(items.get(1).unwrap().creator.display_name, "unknown");
    }

    #[test]
    fn trending_items_are_limited() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", VIDEOS_PATH)
            .match_query(Matcher::UrlEncoded(
                "queries[]".into(),
                r#"{"method":"limit","values":[7]}"#.into(),
            ))
            .with_status(200)
            .with_body(videos_body())
            .create();

        client(&server).list_trending_items(7).unwrap();
        mock.assert();
    }

    #[test]
    fn error_status_becomes_fetch_error() {
        let mut server = Server::new();
        server
            .mock("GET", VIDEOS_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message":"Collection not found","code":404}"#)
            .create();

        let err = client(&server).search_items("cats").unwrap_err();
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Collection not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn no_session_means_no_current_user() {
        let server = Server::new();
        assert_eq!(client(&server).current_user().unwrap(), None);
    }

    #[test]
    fn expired_session_means_no_current_user() {
        let mut server = Server::new();
        server.mock("GET", "/account").with_status(401).create();

        let mut client = client(&server);
        client.cookies = Some("expired".into());
        assert_eq!(client.current_user().unwrap(), None);
    }

    #[test]
    fn sign_in_replays_session_cookie() {
        let mut server = Server::new();
        let session = server
            .mock("POST", "/account/sessions/email")
            .match_body(Matcher::PartialJson(json!({ "email": "js@test.dev" })))
            .with_status(201)
            .with_header("X-Fallback-Cookies", r#"{"a_session_aora":"secret"}"#)
            .with_body("{}")
            .create();
        let account = server
            .mock("GET", "/account")
            .match_header("x-fallback-cookies", r#"{"a_session_aora":"secret"}"#)
            .with_status(200)
            .with_body(r#"{"$id":"acc-1","email":"js@test.dev"}"#)
            .create();
        let users = server
            .mock("GET", USERS_PATH)
            .match_query(Matcher::UrlEncoded(
                "queries[]".into(),
                r#"{"attribute":"accountId","method":"equal","values":["acc-1"]}"#.into(),
            ))
            .with_status(200)
            .with_body(user_body())
            .create();

        let mut client = client(&server);
        let user = client.sign_in("js@test.dev", "hunter22").unwrap();

        session.assert();
        account.assert();
        users.assert();
        assert_eq!(user.id, "u1");
        assert_eq!(user.account_id, "acc-1");
        assert_eq!(user.followers, None);
    }

    #[test]
    fn sign_out_drops_local_session_even_on_failure() {
        let mut server = Server::new();
        server
            .mock("DELETE", "/account/sessions/current")
            .with_status(500)
            .with_body(r#"{"message":"server error"}"#)
            .create();

        let mut client = client(&server);
        client.cookies = Some("secret".into());

        assert!(matches!(client.sign_out(), Err(AuthError::Status { status: 500, .. })));
        assert!(client.cookies.is_none());
    }
}
