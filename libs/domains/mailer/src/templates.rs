//! Mail body templates for the convenience builders.
//!
//! Bodies ship fully rendered inside the job, so these are plain
//! interpolations: each template returns `(subject, html, text)`.

pub fn welcome(name: &str) -> (String, String, String) {
    let subject = format!("Welcome to Campus, {}!", name);
    let html = format!(
        "<h2>Welcome, {name}!</h2>\
         <p>Your student account has been created. You can now sign in, track \
         your application and view your academic record.</p>\
         <p>We're glad to have you.</p>"
    );
    let text = format!(
        "Welcome, {name}!\n\nYour student account has been created. You can now \
         sign in, track your application and view your academic record.\n\nWe're \
         glad to have you."
    );
    (subject, html, text)
}

pub fn application_status(name: &str, application_id: &str, status: &str) -> (String, String, String) {
    let subject = format!("Application {} status update", application_id);
    let html = format!(
        "<h2>Hello {name},</h2>\
         <p>The status of your application <strong>{application_id}</strong> \
         has changed to <strong>{status}</strong>.</p>\
         <p>Sign in to your dashboard for details.</p>"
    );
    let text = format!(
        "Hello {name},\n\nThe status of your application {application_id} has \
         changed to {status}.\n\nSign in to your dashboard for details."
    );
    (subject, html, text)
}

pub fn exam_notification(name: &str, exam_name: &str, exam_date: &str) -> (String, String, String) {
    let subject = format!("Exam scheduled: {}", exam_name);
    let html = format!(
        "<h2>Hello {name},</h2>\
         <p>Your exam <strong>{exam_name}</strong> is scheduled for \
         <strong>{exam_date}</strong>.</p>\
         <p>Check your hall ticket and arrive early.</p>"
    );
    let text = format!(
        "Hello {name},\n\nYour exam {exam_name} is scheduled for {exam_date}.\n\n\
         Check your hall ticket and arrive early."
    );
    (subject, html, text)
}

pub fn password_reset(name: &str, reset_url: &str) -> (String, String, String) {
    let subject = "Reset your password".to_string();
    let html = format!(
        "<h2>Hello {name},</h2>\
         <p>We received a request to reset your password. Click the link below \
         to choose a new one:</p>\
         <p><a href=\"{reset_url}\">{reset_url}</a></p>\
         <p>If you didn't request this, you can safely ignore this email.</p>"
    );
    let text = format!(
        "Hello {name},\n\nWe received a request to reset your password. Open \
         the link below to choose a new one:\n\n{reset_url}\n\nIf you didn't \
         request this, you can safely ignore this email."
    );
    (subject, html, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_mentions_name_and_subject() {
        let (subject, html, text) = welcome("Jane");
        assert!(subject.contains("Welcome"));
        assert!(html.contains("Jane"));
        assert!(text.contains("Jane"));
    }

    #[test]
    fn test_exam_notification_interpolates_schedule() {
        let (subject, html, text) = exam_notification("Jane", "Algorithms I", "2026-03-14");
        assert!(subject.contains("Algorithms I"));
        assert!(html.contains("2026-03-14"));
        assert!(text.contains("2026-03-14"));
    }

    #[test]
    fn test_password_reset_carries_url() {
        let (_, html, text) = password_reset("Jane", "https://campus.example/reset?t=abc");
        assert!(html.contains("https://campus.example/reset?t=abc"));
        assert!(text.contains("https://campus.example/reset?t=abc"));
    }
}
