use crate::domain::profile::entities::{ActivityLevel, Sex, UserProfile};

/// Language every generated text must be written in.
pub const RESPONSE_LOCALE: &str = "português de Portugal";

pub fn activity_level_description(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Sedentary => "Sedentário (pouco ou nenhum exercício)",
        ActivityLevel::Light => "Ligeiramente ativo (exercício leve 1 a 3 dias por semana)",
        ActivityLevel::Moderate => "Moderadamente ativo (exercício moderado 3 a 5 dias por semana)",
        ActivityLevel::Active => "Muito ativo (exercício intenso 6 a 7 dias por semana)",
        ActivityLevel::VeryActive => "Extremamente ativo (treino muito intenso ou trabalho físico)",
    }
}

fn sex_label(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "Masculino",
        Sex::Female => "Feminino",
    }
}

/// Free text goes on a single line so it cannot break the prompt layout.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn build_plan_prompt(profile: &UserProfile) -> String {
    format!(
        "Elabora um plano semanal de alimentação e exercício, escrito em {locale}, para uma pessoa com o seguinte perfil:
- Idade: {age} anos
- Peso: {weight} kg
- Altura: {height} cm
- Sexo: {sex}
- Nível de atividade física: {activity}
- Objetivo: {goal}

O plano deve conter:
1. Refeições para 7 dias, de segunda-feira a domingo, com 4 refeições por dia: pequeno-almoço (breakfast), almoço (lunch), lanche (snack) e jantar (dinner). Para cada refeição indica uma descrição e uma estimativa de calorias. Privilegia refeições equilibradas, com ingredientes fáceis de encontrar em Portugal.
2. Um treino para cada um dos 7 dias, alternando cardio, força e dias de descanso. Para cada dia indica a descrição do treino e a duração em minutos (0 nos dias de descanso). Os treinos devem poder ser feitos em casa ou num ginásio com equipamento básico.
3. O total de calorias de cada dia.
4. Uma única lista de compras para a semana inteira, que junte os ingredientes de todas as refeições e esteja organizada por categorias (por exemplo: Frutas, Legumes, Proteínas, Laticínios, Cereais).

Responde apenas com JSON válido que siga o schema fornecido, sem qualquer texto adicional.",
        locale = RESPONSE_LOCALE,
        age = profile.age(),
        weight = profile.weight(),
        height = profile.height(),
        sex = sex_label(profile.sex()),
        activity = activity_level_description(profile.activity_level()),
        goal = single_line(profile.goal()),
    )
}
