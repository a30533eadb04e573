//! Database seeding for development environments: fixture accounts, a
//! course catalog, and a population of students, tutors, requests and
//! invoices with matched availabilities.

use anyhow::Result;
use rand::prelude::*;
use rust_decimal::Decimal;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::db::{
    CourseRepository, DatabaseError, InvoiceRepository, NewCourse, NewInvoice, NewTutorProfile,
    NewUser, RequestStatus, SessionRequestRepository, UserRepository, UserRole,
};
use crate::scheduling::{count_with_intersection, invoice_terms, Availability, Weekday};

const USER_COUNT: usize = 300;

const FIRST_NAMES: &[&str] = &[
    "Oliver", "Amelia", "George", "Isla", "Harry", "Ava", "Noah", "Emily", "Jack", "Sophia",
    "Charlie", "Grace", "Jacob", "Lily", "Thomas", "Freya", "Oscar", "Poppy", "William", "Ella",
    "James", "Mia", "Henry", "Evie", "Leo", "Ivy", "Archie", "Florence", "Joshua", "Willow",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Johnson", "Davies", "Robinson",
    "Wright", "Thompson", "Evans", "Walker", "White", "Roberts", "Green", "Hall", "Wood",
    "Jackson", "Clarke", "Patel", "Khan", "Lewis", "James", "Phillips", "Mason", "Mitchell",
    "Rose", "Davis", "Rodgers",
];

const TIME_SLOTS: &[&str] = &["1:00", "2:00", "3:00", "4:00", "5:00"];

struct UserFixture {
    username: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    role: UserRole,
}

const USER_FIXTURES: &[UserFixture] = &[
    UserFixture {
        username: "@johndoe",
        email: "john.doe@example.org",
        first_name: "John",
        last_name: "Doe",
        role: UserRole::Student,
    },
    UserFixture {
        username: "@janedoe",
        email: "jane.doe@example.org",
        first_name: "Jane",
        last_name: "Doe",
        role: UserRole::Tutor,
    },
    UserFixture {
        username: "@charlie",
        email: "charlie.johnson@example.org",
        first_name: "Charlie",
        last_name: "Johnson",
        role: UserRole::Admin,
    },
];

fn course_fixtures() -> Vec<NewCourse> {
    vec![
        NewCourse {
            name: "Python Basics".to_string(),
            description: "Learn Python fundamentals including variables, loops, functions and basic data structures".to_string(),
            price: Decimal::new(9999, 2),
        },
        NewCourse {
            name: "Java Basics".to_string(),
            description: "Learn Java fundamentals including variables, loops, functions and basic data structures".to_string(),
            price: Decimal::new(9999, 2),
        },
        NewCourse {
            name: "C++ Basics".to_string(),
            description: "Deep dive into OOP, pointers, addresses, and other basic C++ concepts".to_string(),
            price: Decimal::new(14999, 2),
        },
        NewCourse {
            name: "Advanced Python".to_string(),
            description: "Deep dive into OOP, decorators, generators, and advanced Python concepts".to_string(),
            price: Decimal::new(14999, 2),
        },
        NewCourse {
            name: "Web Development Fundamentals".to_string(),
            description: "HTML, CSS and JavaScript basics for building interactive websites".to_string(),
            price: Decimal::new(12999, 2),
        },
        NewCourse {
            name: "React Framework".to_string(),
            description: "Modern React including hooks, state management, and component architecture".to_string(),
            price: Decimal::new(17999, 2),
        },
        NewCourse {
            name: "Data Structures & Algorithms".to_string(),
            description: "Essential DS&A concepts with Python implementations".to_string(),
            price: Decimal::new(19999, 2),
        },
    ]
}

pub async fn run(pool: &PgPool) -> Result<()> {
    seed_courses(pool).await?;
    seed_users(pool).await?;
    assign_tutors_to_courses(pool).await?;
    enroll_students(pool).await?;
    seed_session_requests(pool).await?;
    info!("Seeding complete");
    Ok(())
}

async fn seed_courses(pool: &PgPool) -> Result<()> {
    for course in course_fixtures() {
        let mut tx = pool.begin().await?;
        match CourseRepository::create(&mut tx, &course).await {
            Ok(_) => tx.commit().await?,
            Err(err) => warn!(course = %course.name, error = %err, "Skipping course fixture"),
        }
    }
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<()> {
    for fixture in USER_FIXTURES {
        let new_user = NewUser {
            username: fixture.username.to_string(),
            email: fixture.email.to_string(),
            first_name: fixture.first_name.to_string(),
            last_name: fixture.last_name.to_string(),
            role: fixture.role,
        };
        create_user(pool, &new_user).await?;
    }

    let mut created = USER_FIXTURES.len();
    let mut attempts = 0;
    while created < USER_COUNT && attempts < USER_COUNT * 20 {
        attempts += 1;
        let new_user = generate_user();
        match create_user(pool, &new_user).await? {
            true => {
                created += 1;
                if created % 50 == 0 {
                    info!("Seeded {}/{} users", created, USER_COUNT);
                }
            }
            false => continue,
        }
    }
    info!("User seeding complete ({} users)", created);
    Ok(())
}

/// Insert a user together with the profile their role calls for.
/// Returns false when the username or email already exists.
async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<bool> {
    // Sample everything random up front; ThreadRng must not be held
    // across the awaits below.
    let (availability, years_exp, rate) = {
        let mut rng = thread_rng();
        (
            generate_availability(&mut rng),
            rng.gen_range(1..=15),
            Decimal::new(rng.gen_range(50..=300), 2),
        )
    };

    let mut tx = pool.begin().await?;

    let user = match UserRepository::create_user(&mut tx, new_user).await {
        Ok(user) => user,
        Err(DatabaseError::Duplicate) => return Ok(false),
        Err(err) => return Err(err.into()),
    };

    match user.role {
        UserRole::Student => {
            UserRepository::create_student_profile(&mut tx, user.id, &availability).await?;
        }
        UserRole::Tutor => {
            UserRepository::create_tutor_profile(
                &mut tx,
                &NewTutorProfile {
                    user_id: user.id,
                    availability,
                    years_exp,
                    rate,
                },
            )
            .await?;
        }
        UserRole::Admin => {}
    }

    tx.commit().await?;
    Ok(true)
}

fn generate_user() -> NewUser {
    let mut rng = thread_rng();
    let first_name = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Sam");
    let last_name = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Smith");

    NewUser {
        username: format!("@{}{}", first_name.to_lowercase(), last_name.to_lowercase()),
        email: format!("{}.{}@example.org", first_name, last_name),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role: generate_role(&mut rng),
    }
}

fn generate_role(rng: &mut impl Rng) -> UserRole {
    let roll: f64 = rng.gen();
    if roll < 0.80 {
        UserRole::Student
    } else if roll < 0.95 {
        UserRole::Tutor
    } else {
        UserRole::Admin
    }
}

/// 1-3 weekdays (weekdays only, no weekends), each with 1-3 of the
/// fixture time slots.
fn generate_availability(rng: &mut impl Rng) -> Availability {
    let weekdays = &Weekday::ALL[..5];
    let day_count = rng.gen_range(1..=3);
    let mut availability = Availability::new();
    for day in weekdays.choose_multiple(rng, day_count) {
        let slot_count = rng.gen_range(1..=3);
        for slot in TIME_SLOTS.choose_multiple(rng, slot_count) {
            availability.add_slot(*day, *slot);
        }
    }
    availability
}

async fn assign_tutors_to_courses(pool: &PgPool) -> Result<()> {
    let courses = CourseRepository::list(pool).await?;
    let tutors = UserRepository::list_by_role(pool, UserRole::Tutor).await?;
    if tutors.is_empty() {
        warn!("No tutors to assign to courses");
        return Ok(());
    }

    for course in &courses {
        let picks: Vec<i64> = {
            let mut rng = thread_rng();
            let count = rng.gen_range(1..=5);
            (0..count)
                .filter_map(|_| tutors.choose(&mut rng).map(|tutor| tutor.id))
                .collect()
        };

        let mut tx = pool.begin().await?;
        for tutor_id in picks {
            CourseRepository::add_tutor(&mut tx, course.id, tutor_id).await?;
        }
        tx.commit().await?;
    }
    Ok(())
}

async fn enroll_students(pool: &PgPool) -> Result<()> {
    let courses = CourseRepository::list(pool).await?;
    let students = UserRepository::list_by_role(pool, UserRole::Student).await?;
    if courses.is_empty() {
        warn!("No courses to enroll students in");
        return Ok(());
    }

    for student in &students {
        let picks: Vec<i64> = {
            let mut rng = thread_rng();
            let course_count = rng.gen_range(1..=3.min(courses.len()));
            courses
                .choose_multiple(&mut rng, course_count)
                .map(|course| course.id)
                .collect()
        };

        let mut tx = pool.begin().await?;
        for course_id in picks {
            CourseRepository::enroll_student(&mut tx, course_id, student.id).await?;
        }
        tx.commit().await?;
    }
    Ok(())
}

/// For every student and enrolled course, pick a qualified tutor and
/// create a request plus its invoice from the availability the two
/// share. Pairs with no overlap are skipped outright.
async fn seed_session_requests(pool: &PgPool) -> Result<()> {
    let today = OffsetDateTime::now_utc().date();
    let student_profiles = UserRepository::list_student_profiles(pool).await?;

    for profile in &student_profiles {
        let courses = CourseRepository::courses_for_student(pool, profile.user_id).await?;
        for course in &courses {
            let tutor_profiles =
                CourseRepository::qualified_tutor_profiles(pool, course.id).await?;
            let Some(tutor) = tutor_profiles.choose(&mut thread_rng()) else {
                warn!(
                    student_id = profile.user_id,
                    course = %course.name,
                    "No available tutors for course"
                );
                continue;
            };

            let shared = profile.availability.intersect(&tutor.availability);
            if shared.is_empty() {
                warn!(
                    student_id = profile.user_id,
                    tutor_id = tutor.user_id,
                    "No shared availability between student and tutor"
                );
                continue;
            }

            let (start_date, end_date, status) = {
                let mut rng = thread_rng();
                let start_date = today + Duration::days(rng.gen_range(1..=30));
                let end_date = start_date + Duration::weeks(rng.gen_range(1..=12));
                let status = *[
                    RequestStatus::Pending,
                    RequestStatus::Accepted,
                    RequestStatus::Rejected,
                ]
                .choose(&mut rng)
                .unwrap_or(&RequestStatus::Pending);
                (start_date, end_date, status)
            };

            let occurrences = count_with_intersection(
                start_date,
                end_date,
                &profile.availability,
                &tutor.availability,
            );
            let terms = invoice_terms(course.price, occurrences, start_date);

            let mut tx = pool.begin().await?;
            let request = SessionRequestRepository::create_seeded(
                &mut tx,
                profile.user_id,
                tutor.user_id,
                course.id,
                &shared,
                start_date,
                end_date,
                status,
            )
            .await?;
            InvoiceRepository::create(
                &mut tx,
                &NewInvoice {
                    student_id: request.student_id,
                    tutor_id: tutor.user_id,
                    course_id: course.id,
                    due_date: terms.due_date,
                    total: terms.total,
                },
            )
            .await?;
            tx.commit().await?;
        }
    }
    Ok(())
}
