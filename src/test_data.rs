#[cfg(test)]
pub const NEWS_DATA: &str = "---
title: Robot arm workshop
date: 2024-03-10
excerpt: Join us to build a six axis arm.
image: /images/arm.png
emoji: ARM
highlight: true
---

We are building a **robot arm** this spring.

## Parts list

| Part | Qty |
|------|-----|
| Servo | 6 |

```rust
fn main() {}
```
";

#[cfg(test)]
pub const MEMBER_DATA: &str = "---
name: Ada Lovelace
role: Organizer
skills:
  - ROS
  - Embedded C
---
Ada keeps the robots honest.
";

#[cfg(test)]
pub const UNDATED_DATA: &str = "---
title: Untimed
date: sometime next spring
---
Body.
";
