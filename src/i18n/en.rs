//! English strings, sorted by key.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("auth.email", "Email"),
    ("auth.errors.email", "Please enter a valid email"),
    ("auth.errors.invalid_token", "Invalid token"),
    ("auth.errors.password_match", "Passwords do not match"),
    (
        "auth.errors.password_strength",
        "Password must contain at least 8 characters, one uppercase letter, one lowercase letter, one number and one special character.",
    ),
    ("auth.log_in.button", "Log in"),
    ("auth.log_in.header", "Log in"),
    ("auth.log_in.subheader", "Enter your credentials to log in"),
    ("auth.log_out", "Log out"),
    ("auth.password", "Password"),
    ("auth.password_confirm", "Confirm password"),
    ("auth.recover_password.button", "Send recovery email"),
    ("auth.recover_password.header", "Recover password"),
    (
        "auth.recover_password.subheader",
        "Enter your email to recover your password",
    ),
    ("auth.reset_password.button", "Reset password"),
    ("auth.reset_password.header", "Reset password for email {email}"),
    ("auth.reset_password.subheader", "Enter your new password"),
    ("auth.sign_up.header", "Create an account"),
    ("auth.sign_up.subheader", "Enter your email to create an account"),
    ("auth.success.recovery_email", "Recovery email sent"),
    ("auth.success.reset_password", "Password reset successfully"),
    ("forms.continue", "Continue"),
    (
        "forms.errors.accepted_image_types",
        "Accepted image types are {accepted_image_types}",
    ),
    ("forms.errors.max_file_size", "Max file size is {max_file_size}"),
    (
        "forms.errors.max_length",
        "This field must contain at most {max_length} characters",
    ),
    (
        "forms.errors.min_length",
        "This field must contain at least {min_length} characters",
    ),
    ("forms.errors.required", "Required field"),
    ("forms.go_back", "Go back"),
    ("forms.save", "Save"),
    ("go_to_app", "Go to app"),
    ("server.auth.invalid.invalid_credentials", "Invalid credentials"),
    (
        "server.auth.invalid.password_not_strong",
        "Password not strong enough",
    ),
    ("server.internal_server_error", "Internal server error"),
    (
        "server.user.conflict.email_already_registered",
        "Email already registered",
    ),
    ("server.user.invalid.inactive", "Inactive user"),
    ("server.user.update_success", "User updated successfully"),
    ("settings.header", "Settings"),
    ("settings.language.header", "Language"),
    ("settings.theme.auto", "Auto"),
    ("settings.theme.dark", "Dark"),
    ("settings.theme.header", "Theme"),
    ("settings.theme.light", "Light"),
    ("user.edit_profile_modal.avatar", "Avatar"),
    ("user.edit_profile_modal.header", "Edit profile"),
    ("user.first_name", "First name"),
    ("user.last_name", "Last name"),
    ("user.profile", "Profile"),
    ("user.success.update", "User updated successfully"),
    ("user.username", "Username"),
    ("welcome", "Welcome"),
];
