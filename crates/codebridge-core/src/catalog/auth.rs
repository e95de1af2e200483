use crate::selection::Language;

pub(crate) fn lookup(language: Language) -> Option<&'static str> {
    match language {
        Language::Python => Some(AUTH_EXAMPLE_PYTHON),
        _ => None,
    }
}

const AUTH_EXAMPLE_PYTHON: &str = r#"# Simple user authentication system

# User credentials store (in a real system, this would be a database with hashed passwords)
users = {
    "admin": "password123",
    "john": "secure456",
    "sarah": "test789"
}

def authenticate_user(username, password):
    """
    Authenticate a user with their username and password

    Returns:
        bool: True if authentication successful, False otherwise
    """
    # Check if the username exists
    if username not in users:
        print(f"User '{username}' not found")
        return False

    # Check if the password matches
    if users[username] != password:
        print(f"Incorrect password for user '{username}'")
        return False

    # Authentication successful
    print(f"User '{username}' authenticated successfully")
    return True

# Example usage
if __name__ == "__main__":
    print("Testing with valid credentials:")
    authenticate_user("admin", "password123")

    print("\nTesting with invalid credentials:")
    authenticate_user("admin", "wrongpassword")

    print("\nTesting with non-existent user:")
    authenticate_user("unknown", "password123")"#;
