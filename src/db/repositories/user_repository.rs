use sqlx::{PgPool, Postgres, Transaction};

use crate::db::error::DatabaseError;
use crate::db::models::{NewTutorProfile, NewUser, StudentProfile, TutorProfile, User, UserRole};
use crate::scheduling::Availability;

pub struct UserRepository;

impl UserRepository {
    pub async fn create_user(
        tx: &mut Transaction<'_, Postgres>,
        new_user: &NewUser,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, first_name, last_name, role, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(new_user.email.to_lowercase())
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.role)
        .fetch_one(&mut **tx)
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn list_usernames(pool: &PgPool) -> Result<Vec<String>, DatabaseError> {
        let usernames = sqlx::query_scalar::<_, String>(
            "SELECT username FROM users ORDER BY last_name, first_name",
        )
        .fetch_all(pool)
        .await?;

        Ok(usernames)
    }

    pub async fn list_by_role(pool: &PgPool, role: UserRole) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, first_name, last_name, role, created_at
            FROM users
            WHERE role = $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(role)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    pub async fn count_by_role(pool: &PgPool, role: UserRole) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    pub async fn create_student_profile(
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
        availability: &Availability,
    ) -> Result<StudentProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"
            INSERT INTO student_profiles (user_id, availability)
            VALUES ($1, $2)
            RETURNING user_id, availability
            "#,
        )
        .bind(user_id)
        .bind(sqlx::types::Json(availability))
        .fetch_one(&mut **tx)
        .await?;

        Ok(profile)
    }

    pub async fn create_tutor_profile(
        tx: &mut Transaction<'_, Postgres>,
        profile: &NewTutorProfile,
    ) -> Result<TutorProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, TutorProfile>(
            r#"
            INSERT INTO tutor_profiles (user_id, availability, years_exp, rate)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, availability, years_exp, rate
            "#,
        )
        .bind(profile.user_id)
        .bind(sqlx::types::Json(&profile.availability))
        .bind(profile.years_exp)
        .bind(profile.rate)
        .fetch_one(&mut **tx)
        .await?;

        Ok(profile)
    }

    #[allow(unused)]
    pub async fn get_student_profile(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Option<StudentProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            "SELECT user_id, availability FROM student_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    #[allow(unused)]
    pub async fn get_tutor_profile(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Option<TutorProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, TutorProfile>(
            "SELECT user_id, availability, years_exp, rate FROM tutor_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    pub async fn list_student_profiles(pool: &PgPool) -> Result<Vec<StudentProfile>, DatabaseError> {
        let profiles = sqlx::query_as::<_, StudentProfile>(
            "SELECT user_id, availability FROM student_profiles ORDER BY user_id",
        )
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }
}
