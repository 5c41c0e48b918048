//! In-memory repositories for tests
//!
//! `InMemoryStore` implements every repository trait over one mutex-guarded
//! state, enforcing the same unique keys as the MySQL schema (emails compare
//! case-insensitively, like the column's collation). Each trait call
//! holds the lock for its whole sequence, so writes are atomic.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::api::AppState;
use crate::auth::password::hash_password;
use crate::domain::repositories::course_repository::{
    CourseChanges, CourseDetail, CourseListing, CourseRepository, NewCourse,
};
use crate::domain::repositories::user_repository::{
    Credentials, NewUser, UserChanges, UserProfile, UserRepository, UserRow,
};
use crate::domain::repositories::{RepositoryError, RepositoryResult, ReservationRepository};
use crate::domain::reservation::{Reservation, DEFAULT_DOG_NAME};
use crate::domain::user::{Email, Role};
use crate::domain::LongText;

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    nom: String,
    prenom: String,
    nom_utilisateur: String,
    email: String,
    password_hash: String,
    role: Role,
    registered_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
struct StoredCourse {
    id: i64,
    nom: String,
    duree: i32,
    created_at: NaiveDateTime,
    owner_id: i64,
    type_id: i64,
}

/// A dog row, exposed for assertions
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDog {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredUser>,
    courses: Vec<StoredCourse>,
    types: Vec<(i64, String)>,
    dogs: Vec<StoredDog>,
    reservations: Vec<(i64, i64)>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn profile(&self, id: i64) -> Option<UserProfile> {
        self.users.iter().find(|u| u.id == id).map(|u| UserProfile {
            id_utilisateur: u.id,
            nom: Some(u.nom.clone()),
            prenom: Some(u.prenom.clone()),
            nom_utilisateur: Some(u.nom_utilisateur.clone()),
            email: u.email.clone(),
            nom_role: u.role.to_string(),
            date_inscription: Some(u.registered_at),
        })
    }

    fn email_taken(&self, email: &Email, excluding: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email.as_str()) && Some(u.id) != excluding)
    }

    fn type_name(&self, type_id: i64) -> String {
        self.types
            .iter()
            .find(|(id, _)| *id == type_id)
            .map(|(_, name)| name.clone())
            .unwrap_or_default()
    }

    fn detail(&self, id: i64) -> Option<CourseDetail> {
        self.courses.iter().find(|c| c.id == id).map(|c| CourseDetail {
            id_cours: c.id,
            nom: c.nom.clone(),
            duree_cours: Some(c.duree),
            date_creation_cours: Some(c.created_at),
            id_type: c.type_id,
            nom_type: self.type_name(c.type_id),
        })
    }

    fn course_name_taken(&self, nom: &str, excluding: Option<i64>) -> bool {
        self.courses
            .iter()
            .any(|c| c.nom == nom && Some(c.id) != excluding)
    }

    fn upsert_type(&mut self, nom_type: &LongText) -> i64 {
        if let Some((id, _)) = self.types.iter().find(|(_, n)| n == nom_type.as_str()) {
            return *id;
        }
        let id = self.next_id();
        self.types.push((id, nom_type.as_str().to_string()));
        id
    }

    fn ensure_dog(&mut self, user_id: i64) -> i64 {
        if let Some(dog) = self.dogs.iter().find(|d| d.owner_id == user_id) {
            return dog.id;
        }
        let id = self.next_id();
        self.dogs.push(StoredDog {
            id,
            owner_id: user_id,
            name: DEFAULT_DOG_NAME.to_string(),
        });
        id
    }
}

fn role_id(role: Role) -> i64 {
    match role {
        Role::Admin => 1,
        Role::Coach => 2,
        Role::Member => 3,
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Shared in-memory database
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Connection("in-memory store poisoned".to_string()))
    }

    /// Application state wired to this store
    pub fn app_state(&self, jwt_secret: &str, bcrypt_cost: u32) -> AppState {
        AppState {
            users: Arc::new(self.clone()),
            courses: Arc::new(self.clone()),
            reservations: Arc::new(self.clone()),
            jwt_secret: Arc::from(jwt_secret),
            bcrypt_cost,
        }
    }

    /// Inserts an account directly, bypassing registration's fixed role
    pub fn seed_user(&self, email: &str, password: &str, role: Role, bcrypt_cost: u32) -> i64 {
        let password_hash = hash_password(password, bcrypt_cost).expect("hash seed password");
        let mut tables = self.tables.lock().expect("store lock");
        let id = tables.next_id();
        tables.users.push(StoredUser {
            id,
            nom: "Seed".to_string(),
            prenom: "User".to_string(),
            nom_utilisateur: format!("seed{}", id),
            email: email.to_string(),
            password_hash,
            role,
            registered_at: now(),
        });
        id
    }

    pub fn course_count(&self) -> usize {
        self.tables.lock().expect("store lock").courses.len()
    }

    pub fn type_count(&self) -> usize {
        self.tables.lock().expect("store lock").types.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().expect("store lock").users.len()
    }

    pub fn dogs_of(&self, user_id: i64) -> Vec<StoredDog> {
        self.tables
            .lock()
            .expect("store lock")
            .dogs
            .iter()
            .filter(|d| d.owner_id == user_id)
            .cloned()
            .collect()
    }

    pub fn reservation_count(&self) -> usize {
        self.tables.lock().expect("store lock").reservations.len()
    }

    /// Stored password hash for an email, if any
    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.tables
            .lock()
            .expect("store lock")
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> RepositoryResult<Vec<UserRow>> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .map(|u| UserRow {
                id_utilisateur: u.id,
                nom: Some(u.nom.clone()),
                prenom: Some(u.prenom.clone()),
                nom_utilisateur: Some(u.nom_utilisateur.clone()),
                email: u.email.clone(),
                mot_de_passe: u.password_hash.clone(),
                id_role: role_id(u.role),
                date_inscription: Some(u.registered_at),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<UserProfile>> {
        Ok(self.lock()?.profile(id))
    }

    async fn find_credentials(&self, email: &Email) -> RepositoryResult<Option<Credentials>> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.as_str()))
            .map(|u| Credentials {
                id_utilisateur: u.id,
                email: u.email.clone(),
                mot_de_passe: u.password_hash.clone(),
                nom_role: u.role.to_string(),
            }))
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<UserProfile> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, None) {
            return Err(RepositoryError::Conflict(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        let id = tables.next_id();
        tables.users.push(StoredUser {
            id,
            nom: user.nom.into_inner(),
            prenom: user.prenom.into_inner(),
            nom_utilisateur: user.nom_utilisateur.into_inner(),
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash,
            role: user.role,
            registered_at: now(),
        });

        tables
            .profile(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", id)))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> RepositoryResult<UserProfile> {
        let mut tables = self.lock()?;
        if !tables.users.iter().any(|u| u.id == id) {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }
        if tables.email_taken(&changes.email, Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "Email already registered: {}",
                changes.email
            )));
        }

        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.nom = changes.nom.into_inner();
            user.prenom = changes.prenom.into_inner();
            user.nom_utilisateur = changes.nom_utilisateur.into_inner();
            user.email = changes.email.as_str().to_string();
            if let Some(hash) = changes.password_hash {
                user.password_hash = hash;
            }
            if let Some(role) = changes.role {
                user.role = role;
            }
        }

        tables
            .profile(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("User {}", id)))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list(&self) -> RepositoryResult<Vec<CourseListing>> {
        let tables = self.lock()?;
        Ok(tables
            .courses
            .iter()
            .map(|c| CourseListing {
                id_cours: c.id,
                nom_cours: c.nom.clone(),
                duree_cours: Some(c.duree),
                date_creation_cours: Some(c.created_at),
                id_utilisateur: Some(c.owner_id),
                id_type: c.type_id,
                nom_type: tables.type_name(c.type_id),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<CourseDetail>> {
        Ok(self.lock()?.detail(id))
    }

    async fn resolve_type(&self, nom_type: &LongText) -> RepositoryResult<i64> {
        Ok(self.lock()?.upsert_type(nom_type))
    }

    async fn create(&self, course: NewCourse) -> RepositoryResult<CourseDetail> {
        let mut tables = self.lock()?;
        if tables.course_name_taken(course.nom.as_str(), None) {
            return Err(RepositoryError::Conflict(format!(
                "Course name already taken: {}",
                course.nom
            )));
        }

        let type_id = tables.upsert_type(&course.nom_type);
        let id = tables.next_id();
        tables.courses.push(StoredCourse {
            id,
            nom: course.nom.into_inner(),
            duree: course.duree.minutes(),
            created_at: now(),
            owner_id: course.owner_id,
            type_id,
        });

        tables
            .detail(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Course {}", id)))
    }

    async fn update(&self, id: i64, changes: CourseChanges) -> RepositoryResult<CourseDetail> {
        let mut tables = self.lock()?;
        if !tables.courses.iter().any(|c| c.id == id) {
            return Err(RepositoryError::NotFound(format!("Course {}", id)));
        }
        if tables.course_name_taken(changes.nom.as_str(), Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "Course name already taken: {}",
                changes.nom
            )));
        }

        let type_id = changes.nom_type.as_ref().map(|t| tables.upsert_type(t));
        if let Some(course) = tables.courses.iter_mut().find(|c| c.id == id) {
            course.nom = changes.nom.into_inner();
            if let Some(duree) = changes.duree {
                course.duree = duree.minutes();
            }
            if let Some(type_id) = type_id {
                course.type_id = type_id;
            }
        }

        tables
            .detail(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Course {}", id)))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        if tables.courses.len() == before {
            return Err(RepositoryError::NotFound(format!("Course {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn ensure_default_dog(&self, user_id: i64) -> RepositoryResult<i64> {
        Ok(self.lock()?.ensure_dog(user_id))
    }

    async fn reserve(&self, user_id: i64, course_id: i64) -> RepositoryResult<Reservation> {
        let mut tables = self.lock()?;
        if !tables.courses.iter().any(|c| c.id == course_id) {
            return Err(RepositoryError::NotFound(format!("Course {}", course_id)));
        }

        let id_chien = tables.ensure_dog(user_id);
        if tables.reservations.contains(&(id_chien, course_id)) {
            return Err(RepositoryError::Conflict(format!(
                "Dog {} already booked on course {}",
                id_chien, course_id
            )));
        }
        tables.reservations.push((id_chien, course_id));

        Ok(Reservation {
            id_chien,
            id_cours: course_id,
        })
    }
}
