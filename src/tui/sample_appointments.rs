use chrono::{Local, TimeZone};
use daybook::{
    app::AppState,
    calendar::{Appointment, EmployeeRef},
};

pub fn add_sample_appointments(app: &mut AppState) {
    let today = Local::now().date_naive();

    let Some(tomorrow) = today.succ_opt() else { return };
    let Some(yesterday) = today.pred_opt() else { return };

    let appointments = vec![
        ("Morning Standup", today, 9, 0, 9, 30, Some(1)),
        ("Client Call", today, 9, 15, 10, 0, Some(2)),
        ("Budget Review", today, 9, 45, 10, 30, None),
        ("Team Sync", today, 14, 0, 15, 0, Some(1)),
        ("Late Shift Handover", today, 21, 0, 23, 0, None),
        ("Code Review", tomorrow, 10, 0, 11, 0, Some(3)),
        ("Sprint Planning", tomorrow, 15, 0, 16, 30, None),
        ("1-on-1 with Manager", yesterday, 11, 0, 11, 30, Some(2)),
        ("Lunch with Team", yesterday, 12, 30, 13, 30, None),
    ];

    let mut sample = Vec::new();
    for (i, (title, date, start_h, start_m, end_h, end_m, employee)) in appointments.into_iter().enumerate() {
        let Some(start_time) = date.and_hms_opt(start_h, start_m, 0) else { continue };
        let Some(end_time) = date.and_hms_opt(end_h, end_m, 0) else { continue };

        let Some(start) = Local.from_local_datetime(&start_time).earliest() else { continue };
        let Some(end) = Local.from_local_datetime(&end_time).earliest() else { continue };

        sample.push(Appointment {
            id: i as i64 + 1,
            start,
            end,
            title: title.to_string(),
            description: "Sample appointment for testing".to_string(),
            employee: employee.map(EmployeeRef::Unresolved),
            participation: vec![],
        });
    }

    tracing::info!("Loaded {} sample appointments", sample.len());
    app.replace_appointments(sample, Local::now());
    app.go_to_date(today);
}
