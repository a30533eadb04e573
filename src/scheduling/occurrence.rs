use time::{Date, Duration};

use super::availability::{Availability, Weekday};

/// Count billable occurrences the way the admin decision path does:
/// over the availability the student submitted with the request, with
/// no regard for the assigned tutor's own pattern.
pub fn count_from_request_only(start_date: Date, end_date: Date, requested: &Availability) -> u32 {
    count_matching_days(start_date, end_date, requested)
}

/// Count billable occurrences the way the seeding path does: over the
/// student's and tutor's shared availability. Returns 0 when the two
/// patterns have no overlap at all.
pub fn count_with_intersection(
    start_date: Date,
    end_date: Date,
    student: &Availability,
    tutor: &Availability,
) -> u32 {
    count_matching_days(start_date, end_date, &student.intersect(tutor))
}

/// Calendar days in `[start_date, end_date]` whose weekday appears in
/// the availability. Every matching weekday counts once per week; a
/// request's fortnightly flag is not consulted here.
///
/// Each full week in the range contributes one occurrence per selected
/// weekday, so only the trailing partial week needs a day-by-day scan.
fn count_matching_days(start_date: Date, end_date: Date, availability: &Availability) -> u32 {
    if end_date < start_date || availability.is_empty() {
        return 0;
    }

    let span_days = (end_date - start_date).whole_days() + 1;
    let full_weeks = span_days / 7;
    let mut count = full_weeks as u32 * availability.day_count() as u32;

    let mut day = start_date + Duration::weeks(full_weeks);
    while day <= end_date {
        if availability.contains_day(Weekday::from(day.weekday())) {
            count += 1;
        }
        match day.next_day() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn on_days(days: &[Weekday]) -> Availability {
        let mut a = Availability::new();
        for day in days {
            a.add_slot(*day, "10:00");
        }
        a
    }

    #[test]
    fn empty_availability_counts_zero_over_any_range() {
        let count = count_from_request_only(
            date!(2024 - 01 - 01),
            date!(2024 - 12 - 31),
            &Availability::new(),
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn inverted_range_counts_zero() {
        let count = count_from_request_only(
            date!(2024 - 03 - 10),
            date!(2024 - 03 - 01),
            &on_days(&[Weekday::Monday]),
        );
        assert_eq!(count, 0);
    }

    #[test]
    fn single_day_range_matches_or_not() {
        // 2024-01-01 is a Monday.
        let monday = on_days(&[Weekday::Monday]);
        let tuesday = on_days(&[Weekday::Tuesday]);

        assert_eq!(
            count_from_request_only(date!(2024 - 01 - 01), date!(2024 - 01 - 01), &monday),
            1
        );
        assert_eq!(
            count_from_request_only(date!(2024 - 01 - 01), date!(2024 - 01 - 01), &tuesday),
            0
        );
    }

    #[test]
    fn full_week_counts_each_selected_day_once() {
        let pattern = on_days(&[Weekday::Monday, Weekday::Wednesday, Weekday::Sunday]);

        // A 7-day window starting on any weekday covers each weekday
        // exactly once.
        let mut start = date!(2024 - 01 - 01);
        for _ in 0..7 {
            let end = start + Duration::days(6);
            assert_eq!(count_from_request_only(start, end, &pattern), 3);
            start = start.next_day().unwrap();
        }
    }

    #[test]
    fn january_2024_mondays_and_wednesdays() {
        // Mondays: 1, 8, 15, 22, 29. Wednesdays: 3, 10, 17, 24, 31.
        let pattern = on_days(&[Weekday::Monday, Weekday::Wednesday]);
        let count =
            count_from_request_only(date!(2024 - 01 - 01), date!(2024 - 01 - 31), &pattern);
        assert_eq!(count, 10);
    }

    #[test]
    fn closed_form_agrees_with_day_by_day_scan() {
        let pattern = on_days(&[Weekday::Tuesday, Weekday::Saturday]);
        let start = date!(2024 - 02 - 03);

        for offset in 0..60 {
            let end = start + Duration::days(offset);
            let mut expected = 0;
            let mut day = start;
            while day <= end {
                if pattern.contains_day(Weekday::from(day.weekday())) {
                    expected += 1;
                }
                day = day.next_day().unwrap();
            }
            assert_eq!(count_from_request_only(start, end, &pattern), expected);
        }
    }

    #[test]
    fn intersection_variant_counts_only_shared_days() {
        let student = on_days(&[Weekday::Monday, Weekday::Wednesday]);
        let tutor = on_days(&[Weekday::Wednesday, Weekday::Friday]);

        // Only Wednesdays are shared: 3, 10, 17, 24, 31.
        let count = count_with_intersection(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
            &student,
            &tutor,
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn intersection_variant_counts_zero_when_disjoint() {
        let student = on_days(&[Weekday::Monday]);
        let tutor = on_days(&[Weekday::Friday]);

        let count = count_with_intersection(
            date!(2024 - 01 - 01),
            date!(2024 - 12 - 31),
            &student,
            &tutor,
        );
        assert_eq!(count, 0);
    }
}
