// ABOUTME: Shared sample model output for plan tests
#![allow(dead_code)]

pub const CHAT_APP_PLAN: &str = r#"{
  "projectName": "Real-Time Chat",
  "projectSummary": "A low-latency chat platform with rooms and direct messages.",
  "overview": "An event-driven backend fans out messages over WebSockets.",
  "techStack": {
    "frontend": ["React with TypeScript", "Tailwind CSS"],
    "backend": ["Node.js with Socket.IO"],
    "database": ["PostgreSQL", "Redis"],
    "devops": ["Docker", "GitHub Actions"],
    "messaging": []
  },
  "pros": ["Low latency delivery", "Horizontal scaling of socket servers"],
  "cons": [],
  "scalability": {
    "title": "Scalability Plan",
    "points": ["Shard rooms across socket nodes", "Use Redis pub/sub for fan-out"]
  },
  "security": "Authenticate sockets with short-lived JWTs.",
  "diagram": "graph TD\n  Client-->Gateway\n  Gateway-->ChatService\n  ChatService-->Postgres",
  "costEstimation": {
    "title": "Monthly Cost Estimation",
    "breakdown": [
      {"category": "Compute", "cost": 240, "details": "Three socket nodes"},
      {"category": "Database", "cost": 95.5, "details": "Managed PostgreSQL"}
    ]
  },
  "roadmap": [
    {"phase": "Phase 1: MVP", "duration": "4 weeks", "tasks": ["Rooms", "Direct messages"]},
    {"phase": "Phase 2: Scale", "duration": "6 weeks", "tasks": ["Presence", "Push notifications"]}
  ],
  "prd": {
    "introduction": "Teams need a fast, reliable chat.",
    "userPersonas": [
      {"name": "Remote Worker", "description": "Chats with teammates all day."},
      {"name": "Moderator", "description": "Keeps rooms healthy."}
    ],
    "features": [
      {"title": "Rooms", "description": "Topic channels.", "userStories": ["As a remote worker, I want rooms so that topics stay separate"]},
      {"title": "Direct Messages", "description": "One-to-one chat.", "userStories": []}
    ],
    "nonFunctionalRequirements": [
      {"type": "Performance", "details": "Deliver messages within 200ms at p95."}
    ]
  }
}"#;
