//! Canned production-style snippets, one per concept.

use crate::selection::Language;
use serde::{Deserialize, Serialize};

/// A real-world use of a concept, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealWorldExample {
    pub title: String,
    pub description: String,
    pub code: String,
}

struct Entry {
    title: &'static str,
    description: &'static str,
    python: &'static str,
    javascript: Option<&'static str>,
    java: Option<&'static str>,
}

fn entry(concept: &str) -> Option<Entry> {
    let entry = match concept {
        "if-else" => Entry {
            title: "User Authentication System",
            description: "This login/signup system uses if-else statements to validate user credentials and handle different authentication scenarios.",
            python: AUTH_SYSTEM_PYTHON,
            javascript: Some(AUTH_SYSTEM_JAVASCRIPT),
            java: None,
        },
        "loops" => Entry {
            title: "Data Processing Pipeline",
            description: "This data processing system uses loops to process records from a dataset.",
            python: DATA_PIPELINE_PYTHON,
            javascript: None,
            java: None,
        },
        "functions" => Entry {
            title: "Task Management System",
            description: "This task management system uses functions to organize and manipulate task data.",
            python: TASK_MANAGER_PYTHON,
            javascript: None,
            java: None,
        },
        "oops" => Entry {
            title: "Vehicle Management System",
            description: "This object-oriented system manages different types of vehicles with inheritance.",
            python: VEHICLE_SYSTEM_PYTHON,
            javascript: None,
            java: None,
        },
        "decorators" => Entry {
            title: "Enhancing Code with Decorators",
            description: "This web API uses decorators to add authentication, caching and timing to request handlers without changing their code.",
            python: API_DECORATORS_PYTHON,
            javascript: Some(API_DECORATORS_JAVASCRIPT),
            java: Some(API_ANNOTATIONS_JAVA),
        },
        _ => return None,
    };
    Some(entry)
}

/// The canned example for `concept`; the code falls back to python when
/// `language` has no snippet.
pub(crate) fn lookup(concept: &str, language: Language) -> Option<RealWorldExample> {
    let entry = entry(concept)?;
    let code = match language {
        Language::Javascript => entry.javascript.unwrap_or(entry.python),
        Language::Java => entry.java.unwrap_or(entry.python),
        _ => entry.python,
    };
    Some(RealWorldExample {
        title: entry.title.to_string(),
        description: entry.description.to_string(),
        code: code.to_string(),
    })
}

const AUTH_SYSTEM_PYTHON: &str = r#"# User Authentication System with if-else statements
from flask import Flask, request, redirect, session, render_template

app = Flask(__name__)
app.secret_key = "your_secret_key"

# Simple user database (in real world, this would be a database)
users = {
    "user@example.com": {"password": "securepass123", "name": "Test User"}
}

@app.route("/login", methods=["GET", "POST"])
def login():
    error = None

    if request.method == "POST":
        email = request.form.get("email")
        password = request.form.get("password")

        # Check if email exists
        if email in users:
            # Check if password matches
            if password == users[email]["password"]:
                session["user"] = email
                return redirect("/dashboard")
            else:
                error = "Incorrect password"
        else:
            error = "Email not registered"

    return render_template("login.html", error=error)

@app.route("/signup", methods=["GET", "POST"])
def signup():
    error = None

    if request.method == "POST":
        email = request.form.get("email")
        password = request.form.get("password")
        confirm = request.form.get("confirm_password")
        name = request.form.get("name")

        # Validate input fields
        if not all([email, password, confirm, name]):
            error = "All fields are required"
        elif email in users:
            error = "Email already registered"
        elif password != confirm:
            error = "Passwords do not match"
        elif len(password) < 8:
            error = "Password must be at least 8 characters"
        else:
            users[email] = {"password": password, "name": name}
            session["user"] = email
            return redirect("/dashboard")

    return render_template("signup.html", error=error)"#;

const AUTH_SYSTEM_JAVASCRIPT: &str = r#"// User Authentication System with if-else statements
const express = require('express');
const session = require('express-session');
const app = express();

app.use(express.urlencoded({ extended: true }));
app.use(session({ secret: 'your_secret_key', resave: false, saveUninitialized: true }));

// Simple user database (in real world, this would be a database)
const users = {
  "user@example.com": { password: "securepass123", name: "Test User" }
};

app.post('/login', (req, res) => {
  const { email, password } = req.body;
  let error = null;

  if (email in users) {
    if (password === users[email].password) {
      req.session.user = email;
      return res.redirect('/dashboard');
    } else {
      error = "Incorrect password";
    }
  } else {
    error = "Email not registered";
  }

  res.render('login', { error });
});

app.post('/signup', (req, res) => {
  const { email, password, confirm_password, name } = req.body;
  let error = null;

  if (!email || !password || !confirm_password || !name) {
    error = "All fields are required";
  } else if (email in users) {
    error = "Email already registered";
  } else if (password !== confirm_password) {
    error = "Passwords do not match";
  } else if (password.length < 8) {
    error = "Password must be at least 8 characters";
  } else {
    users[email] = { password, name };
    req.session.user = email;
    return res.redirect('/dashboard');
  }

  res.render('signup', { error });
});"#;

const API_DECORATORS_PYTHON: &str = r#"# Web API endpoints enhanced with decorators
import functools
import time
from flask import Flask, jsonify, request, session

app = Flask(__name__)
app.secret_key = "your_secret_key"
_cache = {}

def login_required(func):
    @functools.wraps(func)
    def wrapper(*args, **kwargs):
        if "user_id" not in session:
            return jsonify({"error": "Authentication required"}), 401
        return func(*args, **kwargs)
    return wrapper

def cached(seconds):
    def decorator(func):
        @functools.wraps(func)
        def wrapper(*args, **kwargs):
            key = (func.__name__, request.full_path)
            hit = _cache.get(key)
            if hit and time.time() - hit[0] < seconds:
                return hit[1]
            result = func(*args, **kwargs)
            _cache[key] = (time.time(), result)
            return result
        return wrapper
    return decorator

def timed(func):
    @functools.wraps(func)
    def wrapper(*args, **kwargs):
        start = time.perf_counter()
        try:
            return func(*args, **kwargs)
        finally:
            elapsed = (time.perf_counter() - start) * 1000
            app.logger.info("%s took %.1f ms", func.__name__, elapsed)
    return wrapper

@app.route("/api/reports/<int:report_id>")
@login_required
@cached(seconds=60)
@timed
def get_report(report_id):
    # Expensive query, now cached and protected
    return jsonify({"id": report_id, "status": "ready"})"#;

const API_DECORATORS_JAVASCRIPT: &str = r#"// Express handlers enhanced with wrapper functions (decorators)
const express = require('express');
const app = express();
const cache = new Map();

const loginRequired = (handler) => (req, res, next) => {
  if (!req.session || !req.session.userId) {
    return res.status(401).json({ error: 'Authentication required' });
  }
  return handler(req, res, next);
};

const cached = (seconds) => (handler) => async (req, res, next) => {
  const hit = cache.get(req.originalUrl);
  if (hit && Date.now() - hit.time < seconds * 1000) {
    return res.json(hit.body);
  }
  const json = res.json.bind(res);
  res.json = (body) => {
    cache.set(req.originalUrl, { time: Date.now(), body });
    return json(body);
  };
  return handler(req, res, next);
};

const timed = (handler) => async (req, res, next) => {
  const start = process.hrtime.bigint();
  try {
    return await handler(req, res, next);
  } finally {
    const ms = Number(process.hrtime.bigint() - start) / 1e6;
    console.log(`${req.method} ${req.originalUrl} took ${ms.toFixed(1)} ms`);
  }
};

app.get('/api/reports/:id', loginRequired(cached(60)(timed(async (req, res) => {
  res.json({ id: Number(req.params.id), status: 'ready' });
}))));"#;

const API_ANNOTATIONS_JAVA: &str = r##"// Spring REST controller enhanced with annotations
import org.springframework.cache.annotation.Cacheable;
import org.springframework.security.access.prepost.PreAuthorize;
import org.springframework.web.bind.annotation.*;
import io.micrometer.core.annotation.Timed;

@RestController
@RequestMapping("/api/reports")
public class ReportController {
    private final ReportService reportService;

    public ReportController(ReportService reportService) {
        this.reportService = reportService;
    }

    @GetMapping("/{id}")
    @PreAuthorize("isAuthenticated()")
    @Cacheable(value = "reports", key = "#id")
    @Timed(value = "reports.fetch")
    public Report getReport(@PathVariable long id) {
        // Expensive query, now cached, protected and measured
        return reportService.load(id);
    }
}"##;

const DATA_PIPELINE_PYTHON: &str = r#"# Data Processing Pipeline with loops
import csv
import statistics

def process_data(file_path):
    """Process sales data from a CSV file"""
    sales_data = []

    # Read data from CSV file using a for loop
    with open(file_path, 'r') as csvfile:
        reader = csv.DictReader(csvfile)
        for row in reader:
            sales_data.append({
                'category': row['category'],
                'quantity': int(row['quantity']),
                'price': float(row['price']),
                'total': float(row['price']) * int(row['quantity'])
            })

    # Use a for loop to calculate statistics for each category
    category_totals = {}
    category_prices = {}
    for sale in sales_data:
        category = sale['category']
        category_totals[category] = category_totals.get(category, 0) + sale['total']
        category_prices.setdefault(category, []).append(sale['price'])

    averages = {c: statistics.mean(p) for c, p in category_prices.items()}
    return category_totals, averages

totals, averages = process_data('sales_data.csv')
print("Total sales by category:")
for category, total in totals.items():
    print(f"{category}: ${total:.2f}")"#;

const TASK_MANAGER_PYTHON: &str = r#"# Task Management System with functions
from datetime import datetime

# Task storage
tasks = []

def add_task(title, description, priority="medium"):
    """Add a new task to the task list"""
    if not title:
        raise ValueError("Task title is required")
    task = {
        "id": len(tasks) + 1,
        "title": title,
        "description": description,
        "created_at": datetime.now(),
        "priority": priority,
        "completed": False
    }
    tasks.append(task)
    return task

def get_task(task_id):
    """Get a task by its ID"""
    for task in tasks:
        if task["id"] == task_id:
            return task
    return None

def complete_task(task_id):
    """Mark a task as completed"""
    task = get_task(task_id)
    if task:
        task["completed"] = True
    return task

def print_tasks():
    for task in tasks:
        status = "✅" if task["completed"] else "⏳"
        print(f"{status} [{task['priority']}] {task['title']}")

add_task("Write report", "Quarterly numbers", priority="high")
add_task("Review PR", "Check the new login flow")
complete_task(1)
print_tasks()"#;

const VEHICLE_SYSTEM_PYTHON: &str = r#"# Vehicle Management System using OOP principles
from abc import ABC, abstractmethod

class Vehicle(ABC):
    """Base class for all vehicles"""

    def __init__(self, make, model, year, vin):
        self.make = make
        self.model = model
        self.year = year
        self.vin = vin
        self.is_running = False
        self.current_speed = 0

    def start_engine(self):
        """Start the vehicle's engine"""
        if not self.is_running:
            self.is_running = True
            return f"{self.make} {self.model}'s engine started"
        return f"{self.make} {self.model}'s engine is already running"

    def stop_engine(self):
        """Stop the vehicle's engine"""
        if self.is_running:
            self.is_running = False
            self.current_speed = 0
            return f"{self.make} {self.model}'s engine stopped"
        return f"{self.make} {self.model}'s engine is already off"

    @abstractmethod
    def get_fuel_efficiency(self):
        pass

    def __str__(self):
        return f"{self.year} {self.make} {self.model}"


class Car(Vehicle):
    def get_fuel_efficiency(self):
        return f"{self} gets 32 MPG"


class ElectricCar(Vehicle):
    def get_fuel_efficiency(self):
        return f"{self} gets 120 MPGe"


my_car = Car("Toyota", "Camry", 2022, "1HGBH41JXMN109186")
my_electric = ElectricCar("Tesla", "Model 3", 2023, "5YJ3E1EA1KF123456")
print(my_car)
print(my_car.start_engine())
print(my_car.get_fuel_efficiency())
print(my_electric.get_fuel_efficiency())
print(my_car.stop_engine())"#;
