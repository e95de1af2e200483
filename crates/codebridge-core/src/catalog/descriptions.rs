use serde::{Deserialize, Serialize};

/// Short explanation of a concept and where it shows up in practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDescription {
    pub title: String,
    pub description: String,
    pub real_world_use: String,
}

pub(crate) fn lookup(concept: &str) -> Option<ConceptDescription> {
    let (title, description, real_world_use) = match concept {
        "if-else" => (
            "Conditional Logic with If-Else Statements",
            "If-else statements allow programs to make decisions based on conditions. They execute different blocks of code depending on whether a condition is true or false.",
            "Used in user authentication, form validation, error handling, and any situation where a program needs to make decisions based on different conditions.",
        ),
        "loops" => (
            "Iterative Processing with Loops",
            "Loops allow you to execute a block of code repeatedly. The two main types are for loops (definite iteration) and while loops (indefinite iteration).",
            "Used in data processing, search algorithms, batch operations, and any task that requires repeating actions over a collection of items.",
        ),
        "functions" => (
            "Modular Code with Functions",
            "Functions are reusable blocks of code that perform specific tasks. They help organize code, reduce repetition, and improve maintainability.",
            "Used throughout programming to create modular, maintainable code. Examples include API handlers, data transformations, utility operations, and encapsulated business logic.",
        ),
        "oops" => (
            "Object-Oriented Programming",
            "OOP is a programming paradigm based on objects that contain data and code. The four main principles are encapsulation, inheritance, polymorphism, and abstraction.",
            "Used in large software systems, game development, GUI applications, and any complex system that can be modeled as interacting objects.",
        ),
        "decorators" => (
            "Enhancing Functions with Decorators",
            "Decorators wrap a function to add behavior before or after it runs, without changing the function's own code.",
            "Used in web frameworks for routing and authentication, in caching layers, logging, rate limiting, and performance monitoring.",
        ),
        "recursion" => (
            "Self-Referential Solutions with Recursion",
            "Recursion is a technique where a function calls itself to solve smaller instances of the same problem until a base case is reached.",
            "Used in algorithms for tree traversal, graph searching, solving mathematical problems like factorial or Fibonacci series, and divide-and-conquer algorithms.",
        ),
        "data-structures" => (
            "Organizing Data with Data Structures",
            "Data structures are specialized formats for organizing and storing data, each with different efficiency characteristics for various operations.",
            "Used throughout programming for efficient data storage and retrieval. Examples include arrays for sequential data, hashmaps for key-value lookups, stacks for LIFO operations, and trees for hierarchical data.",
        ),
        _ => return None,
    };
    Some(ConceptDescription {
        title: title.to_string(),
        description: description.to_string(),
        real_world_use: real_world_use.to_string(),
    })
}

/// Generic description for concepts without an entry.
pub(crate) fn generic(display_name: String) -> ConceptDescription {
    ConceptDescription {
        title: display_name,
        description: "A fundamental programming concept.".to_string(),
        real_world_use: "Used in various software development scenarios.".to_string(),
    }
}
