//! Teaching examples per concept and language.

use crate::selection::Language;

/// The teaching example for `concept` in exactly `language`, if one exists.
pub(crate) fn lookup(concept: &str, language: Language) -> Option<&'static str> {
    let code = match (concept, language) {
        ("if-else", Language::Python) => IF_ELSE_PYTHON,
        ("if-else", Language::Javascript) => IF_ELSE_JAVASCRIPT,
        ("if-else", Language::Java) => IF_ELSE_JAVA,
        ("loops", Language::Python) => LOOPS_PYTHON,
        ("loops", Language::Javascript) => LOOPS_JAVASCRIPT,
        ("functions", Language::Python) => FUNCTIONS_PYTHON,
        ("functions", Language::Javascript) => FUNCTIONS_JAVASCRIPT,
        ("oops", Language::Python) => OOPS_PYTHON,
        ("oops", Language::Javascript) => OOPS_JAVASCRIPT,
        ("decorators", Language::Python) => DECORATORS_PYTHON,
        ("decorators", Language::Javascript) => DECORATORS_JAVASCRIPT,
        ("decorators", Language::Java) => DECORATORS_JAVA,
        ("recursion", Language::Python) => RECURSION_PYTHON,
        ("data-structures", Language::Python) => DATA_STRUCTURES_PYTHON,
        _ => return None,
    };
    Some(code)
}

pub(crate) const CONCEPTS: &[&str] = &[
    "if-else",
    "loops",
    "functions",
    "oops",
    "decorators",
    "recursion",
    "data-structures",
];

const IF_ELSE_PYTHON: &str = r#"# Example of if-else statements in Python
def check_temperature(temp):
    """
    Check the temperature and return a message based on the value
    """
    if temp > 30:
        return "It's hot outside! Remember to stay hydrated."
    elif temp > 20:
        return "The weather is pleasant today."
    elif temp > 10:
        return "It's a bit cool. Maybe bring a light jacket."
    else:
        return "It's cold! You should wear a warm coat."

# Test with different temperatures
print(check_temperature(35))  # Hot
print(check_temperature(25))  # Pleasant
print(check_temperature(15))  # Cool
print(check_temperature(5))   # Cold"#;

const IF_ELSE_JAVASCRIPT: &str = r#"// Example of if-else statements in JavaScript
function checkTemperature(temp) {
  if (temp > 30) {
    return "It's hot outside! Remember to stay hydrated.";
  } else if (temp > 20) {
    return "The weather is pleasant today.";
  } else if (temp > 10) {
    return "It's a bit cool. Maybe bring a light jacket.";
  } else {
    return "It's cold! You should wear a warm coat.";
  }
}

// Test with different temperatures
console.log(checkTemperature(35));  // Hot
console.log(checkTemperature(25));  // Pleasant
console.log(checkTemperature(15));  // Cool
console.log(checkTemperature(5));   // Cold"#;

const IF_ELSE_JAVA: &str = r#"// Example of if-else statements in Java
public class TemperatureChecker {
    public static String checkTemperature(int temp) {
        if (temp > 30) {
            return "It's hot outside! Remember to stay hydrated.";
        } else if (temp > 20) {
            return "The weather is pleasant today.";
        } else if (temp > 10) {
            return "It's a bit cool. Maybe bring a light jacket.";
        } else {
            return "It's cold! You should wear a warm coat.";
        }
    }

    public static void main(String[] args) {
        System.out.println(checkTemperature(35));  // Hot
        System.out.println(checkTemperature(25));  // Pleasant
        System.out.println(checkTemperature(15));  // Cool
        System.out.println(checkTemperature(5));   // Cold
    }
}"#;

const LOOPS_PYTHON: &str = r#"# Examples of loops in Python

# For loop example - iterating over a list
fruits = ["apple", "banana", "cherry", "date", "elderberry"]
print("Fruits in my basket:")
for fruit in fruits:
    print(f"- {fruit}")

# While loop example - counting down
print("\nLaunch countdown:")
countdown = 5
while countdown > 0:
    print(f"{countdown}...")
    countdown -= 1
print("Blast off!")

# Using range() with for loop
print("\nSquare numbers from 1 to 5:")
for i in range(1, 6):
    print(f"{i} squared is {i**2}")"#;

const LOOPS_JAVASCRIPT: &str = r#"// Examples of loops in JavaScript

// For loop example - iterating over an array
const fruits = ["apple", "banana", "cherry", "date", "elderberry"];
console.log("Fruits in my basket:");
for (let i = 0; i < fruits.length; i++) {
  console.log(`- ${fruits[i]}`);
}

// While loop example - counting down
console.log("\nLaunch countdown:");
let countdown = 5;
while (countdown > 0) {
  console.log(`${countdown}...`);
  countdown--;
}
console.log("Blast off!");"#;

const FUNCTIONS_PYTHON: &str = r#"# Examples of functions in Python

# Function with parameters and return value
def add(a, b):
    """Add two numbers together"""
    return a + b

# Function with default parameter values
def power(base, exponent=2):
    """Calculate the power of a number"""
    return base ** exponent

# Function with arbitrary arguments
def sum_all(*args):
    """Sum any number of arguments"""
    return sum(args)

print(f"5 + 3 = {add(5, 3)}")
print(f"2 squared = {power(2)}")
print(f"2 cubed = {power(2, 3)}")
print(f"Sum of 1..5 = {sum_all(1, 2, 3, 4, 5)}")"#;

const FUNCTIONS_JAVASCRIPT: &str = r#"// Examples of functions in JavaScript

// Function with parameters and return value
function add(a, b) {
  return a + b;
}

// Arrow function (ES6)
const subtract = (a, b) => a - b;

// Function with default parameter values (ES6)
function power(base, exponent = 2) {
  return base ** exponent;
}

// Higher-order function example
function applyOperation(a, b, operationFn) {
  return operationFn(a, b);
}

console.log(`5 + 3 = ${add(5, 3)}`);
console.log(`10 - 4 = ${subtract(10, 4)}`);
console.log(`2³ = ${power(2, 3)}`);
console.log(`4 × 5 = ${applyOperation(4, 5, (a, b) => a * b)}`);"#;

const OOPS_PYTHON: &str = r#"# Example of Object-Oriented Programming in Python

class Vehicle:
    """Base class for all vehicles"""

    def __init__(self, make, model, year):
        self.make = make
        self.model = model
        self.year = year
        self.is_running = False

    def start_engine(self):
        if not self.is_running:
            self.is_running = True
            return f"{self.make} {self.model}'s engine started"
        return f"{self.make} {self.model}'s engine is already running"

    def info(self):
        return f"{self.year} {self.make} {self.model}"


class Car(Vehicle):
    """A car is a vehicle with doors"""

    def __init__(self, make, model, year, doors=4):
        super().__init__(make, model, year)
        self.doors = doors

    def drive(self):
        return f"Driving the {self.info()}"


my_car = Car("Toyota", "Corolla", 2022)
print(my_car.info())
print(my_car.start_engine())
print(my_car.drive())"#;

const OOPS_JAVASCRIPT: &str = r#"// Example of Object-Oriented Programming in JavaScript

class Vehicle {
  constructor(make, model, year) {
    this.make = make;
    this.model = model;
    this.year = year;
    this.isRunning = false;
  }

  startEngine() {
    if (!this.isRunning) {
      this.isRunning = true;
      return `${this.make} ${this.model}'s engine started`;
    }
    return `${this.make} ${this.model}'s engine is already running`;
  }

  info() {
    return `${this.year} ${this.make} ${this.model}`;
  }
}

class Car extends Vehicle {
  drive() {
    return `Driving the ${this.info()}`;
  }
}

const myCar = new Car("Toyota", "Corolla", 2022);
console.log(myCar.info());
console.log(myCar.startEngine());
console.log(myCar.drive());"#;

const DECORATORS_PYTHON: &str = r#"# Python Decorators Example: Timing function execution
import time
import functools

# A decorator to measure execution time
def timer_decorator(func):
    @functools.wraps(func)  # Preserves function metadata
    def wrapper(*args, **kwargs):
        start_time = time.time()
        result = func(*args, **kwargs)
        execution_time = time.time() - start_time
        print(f"Function {func.__name__} took {execution_time:.4f} seconds to run")
        return result

    return wrapper

# Apply decorator to a function
@timer_decorator
def calculate_fibonacci(n):
    """Calculate the nth Fibonacci number iteratively."""
    a, b = 0, 1
    for _ in range(n):
        a, b = b, a + b
    return a

# Test the decorated function
print(f"Result: {calculate_fibonacci(30)}")"#;

const DECORATORS_JAVASCRIPT: &str = r#"// JavaScript Decorators Example: wrapping a function to time it
// (Method decorators need Babel or TypeScript; a higher-order function runs anywhere.)

// A decorator function to measure execution time
function timerDecorator(fn) {
  return function (...args) {
    const startTime = performance.now();
    const result = fn.apply(this, args);
    const executionTime = performance.now() - startTime;
    console.log(`Function ${fn.name} took ${executionTime.toFixed(4)} milliseconds to run`);
    return result;
  };
}

function calculateFibonacci(n) {
  let [a, b] = [0, 1];
  for (let i = 0; i < n; i++) {
    [a, b] = [b, a + b];
  }
  return a;
}

const timedFibonacci = timerDecorator(calculateFibonacci);

// Test the decorated function
console.log(`Result: ${timedFibonacci(20)}`);"#;

const DECORATORS_JAVA: &str = r#"// Java Annotations (Java's version of decorators)
import java.lang.annotation.*;
import java.lang.reflect.*;

// Define custom annotation
@Retention(RetentionPolicy.RUNTIME)
@Target(ElementType.METHOD)
@interface Timer {}

interface Calculator {
    @Timer
    int calculateFibonacci(int n);
}

class FibonacciCalculator implements Calculator {
    public int calculateFibonacci(int n) {
        int a = 0, b = 1;
        for (int i = 0; i < n; i++) {
            int next = a + b;
            a = b;
            b = next;
        }
        return a;
    }
}

public class AnnotationDemo {
    public static void main(String[] args) {
        Calculator real = new FibonacciCalculator();

        // Dynamic proxy that applies timing to @Timer methods
        Calculator timed = (Calculator) Proxy.newProxyInstance(
            Calculator.class.getClassLoader(),
            new Class<?>[] { Calculator.class },
            (proxy, method, methodArgs) -> {
                if (!method.isAnnotationPresent(Timer.class)) {
                    return method.invoke(real, methodArgs);
                }
                long startTime = System.currentTimeMillis();
                try {
                    return method.invoke(real, methodArgs);
                } finally {
                    long executionTime = System.currentTimeMillis() - startTime;
                    System.out.println("Method " + method.getName() + " took " + executionTime + "ms to run");
                }
            }
        );

        System.out.println("Result: " + timed.calculateFibonacci(20));
    }
}"#;

const RECURSION_PYTHON: &str = r#"# Examples of recursion in Python

def factorial(n):
    """Calculate factorial using recursion"""
    # Base case: 0! or 1! = 1
    if n <= 1:
        return 1
    # Recursive case: n! = n * (n-1)!
    return n * factorial(n - 1)

def fibonacci(n):
    """Calculate the nth Fibonacci number using recursion"""
    if n == 0:
        return 0
    if n == 1:
        return 1
    return fibonacci(n - 1) + fibonacci(n - 2)

def sum_digits(n):
    """Sum the digits of a number using recursion"""
    if n < 10:
        return n
    return n % 10 + sum_digits(n // 10)

print(f"5! = {factorial(5)}")
print(f"fibonacci(10) = {fibonacci(10)}")
print(f"sum_digits(12345) = {sum_digits(12345)}")"#;

const DATA_STRUCTURES_PYTHON: &str = r#"# Examples of common data structures in Python

# Lists (Dynamic Arrays)
print("=== Lists ===")
fruits = ["apple", "banana", "cherry", "date"]
fruits.append("elderberry")
print(f"After append: {fruits}")
print(f"First two fruits: {fruits[:2]}")

# Dictionaries (Hash Maps)
print("\n=== Dictionaries ===")
person = {"name": "John Doe", "age": 30}
person["location"] = "New York"
print(f"Person: {person}")

# Sets
print("\n=== Sets ===")
colors = {"red", "green", "blue"}
colors.add("red")
print(f"Unique colors: {sorted(colors)}")

# Tuples
print("\n=== Tuples ===")
point = (3, 4)
x, y = point
print(f"Point: x={x}, y={y}")"#;
