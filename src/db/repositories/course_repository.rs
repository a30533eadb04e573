use sqlx::{PgPool, Postgres, Transaction};

use crate::db::error::DatabaseError;
use crate::db::models::{Course, NewCourse, TutorProfile, UpdateCourse, User};

pub struct CourseRepository;

impl CourseRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, DatabaseError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, description, price, created_at FROM courses ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    pub async fn get(pool: &PgPool, course_id: i64) -> Result<Option<Course>, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, description, price, created_at FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        new_course: &NewCourse,
    ) -> Result<Course, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (name, description, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, price, created_at
            "#,
        )
        .bind(&new_course.name)
        .bind(&new_course.description)
        .bind(new_course.price)
        .fetch_one(&mut **tx)
        .await?;

        Ok(course)
    }

    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
        update: &UpdateCourse,
    ) -> Result<Course, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price)
            WHERE id = $4
            RETURNING id, name, description, price, created_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(course_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(course)
    }

    pub async fn delete(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Tutors qualified to teach the course.
    pub async fn qualified_tutors(
        pool: &PgPool,
        course_id: i64,
    ) -> Result<Vec<User>, DatabaseError> {
        let tutors = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.role, u.created_at
            FROM users u
            JOIN course_tutors ct ON ct.tutor_id = u.id
            WHERE ct.course_id = $1
            ORDER BY u.last_name, u.first_name
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(tutors)
    }

    pub async fn is_tutor_qualified(
        pool: &PgPool,
        course_id: i64,
        tutor_id: i64,
    ) -> Result<bool, DatabaseError> {
        let qualified = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM course_tutors WHERE course_id = $1 AND tutor_id = $2)",
        )
        .bind(course_id)
        .bind(tutor_id)
        .fetch_one(pool)
        .await?;

        Ok(qualified)
    }

    pub async fn add_tutor(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
        tutor_id: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO course_tutors (course_id, tutor_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(tutor_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn enroll_student(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
        student_id: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO course_enrollments (course_id, student_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(student_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn courses_for_student(
        pool: &PgPool,
        student_id: i64,
    ) -> Result<Vec<Course>, DatabaseError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT c.id, c.name, c.description, c.price, c.created_at
            FROM courses c
            JOIN course_enrollments ce ON ce.course_id = c.id
            WHERE ce.student_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    /// Tutor profiles for everyone qualified to teach the course, for
    /// availability matching.
    pub async fn qualified_tutor_profiles(
        pool: &PgPool,
        course_id: i64,
    ) -> Result<Vec<TutorProfile>, DatabaseError> {
        let profiles = sqlx::query_as::<_, TutorProfile>(
            r#"
            SELECT tp.user_id, tp.availability, tp.years_exp, tp.rate
            FROM tutor_profiles tp
            JOIN course_tutors ct ON ct.tutor_id = tp.user_id
            WHERE ct.course_id = $1
            ORDER BY tp.user_id
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(profiles)
    }
}
