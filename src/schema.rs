diesel::table! {
    patient (id) {
        id -> BigInt,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
        gender -> Bool,
    }
}

diesel::table! {
    record (id) {
        id -> BigInt,
        patient_id -> BigInt,
        rdate -> Date,
        age -> BigInt,
        weight -> BigInt,
        height -> BigInt,
        duration -> BigInt,
    }
}

diesel::table! {
    disease (id) {
        id -> BigInt,
        #[max_length = 255]
        description -> Varchar,
    }
}

diesel::table! {
    symptom (id) {
        id -> BigInt,
        #[max_length = 255]
        description -> Varchar,
    }
}

diesel::table! {
    exam (id) {
        id -> BigInt,
        #[max_length = 255]
        description -> Varchar,
    }
}

diesel::table! {
    unit (id) {
        id -> BigInt,
        #[max_length = 20]
        symbol -> Varchar,
        #[max_length = 100]
        description -> Varchar,
    }
}

diesel::table! {
    shape (id) {
        id -> BigInt,
        #[max_length = 100]
        description -> Varchar,
    }
}

diesel::table! {
    vital_sign (id) {
        id -> BigInt,
        unit_id -> BigInt,
        #[max_length = 100]
        description -> Varchar,
    }
}

diesel::table! {
    formulation (id) {
        id -> BigInt,
        shape_id -> BigInt,
        unit_id -> BigInt,
    }
}

diesel::table! {
    medicine (id) {
        id -> BigInt,
        formulation_id -> BigInt,
        #[max_length = 100]
        name -> Varchar,
        dose -> BigInt,
    }
}

diesel::table! {
    disease_history (id) {
        id -> BigInt,
        record_id -> BigInt,
        disease_id -> BigInt,
        description -> Text,
    }
}

diesel::table! {
    record_symptom (record_id, symptom_id) {
        record_id -> BigInt,
        symptom_id -> BigInt,
    }
}

diesel::table! {
    idx (record_id, disease_id) {
        record_id -> BigInt,
        disease_id -> BigInt,
    }
}

diesel::table! {
    record_exam (record_id, exam_id) {
        record_id -> BigInt,
        exam_id -> BigInt,
    }
}

diesel::table! {
    record_vital_sign (id) {
        id -> BigInt,
        record_id -> BigInt,
        vital_sign_id -> BigInt,
        value -> Double,
    }
}

diesel::table! {
    treatment (id) {
        id -> BigInt,
        record_id -> BigInt,
        medicine_id -> BigInt,
        quantity -> BigInt,
        dosage -> Double,
        frequency -> BigInt,
        instructions -> Text,
    }
}

diesel::joinable!(record -> patient (patient_id));
diesel::joinable!(vital_sign -> unit (unit_id));
diesel::joinable!(formulation -> shape (shape_id));
diesel::joinable!(formulation -> unit (unit_id));
diesel::joinable!(medicine -> formulation (formulation_id));
diesel::joinable!(disease_history -> record (record_id));
diesel::joinable!(disease_history -> disease (disease_id));
diesel::joinable!(record_symptom -> record (record_id));
diesel::joinable!(record_symptom -> symptom (symptom_id));
diesel::joinable!(idx -> record (record_id));
diesel::joinable!(idx -> disease (disease_id));
diesel::joinable!(record_exam -> record (record_id));
diesel::joinable!(record_exam -> exam (exam_id));
diesel::joinable!(record_vital_sign -> record (record_id));
diesel::joinable!(record_vital_sign -> vital_sign (vital_sign_id));
diesel::joinable!(treatment -> record (record_id));
diesel::joinable!(treatment -> medicine (medicine_id));

diesel::allow_tables_to_appear_in_same_query!(
    patient,
    record,
    disease,
    symptom,
    exam,
    unit,
    shape,
    vital_sign,
    formulation,
    medicine,
    disease_history,
    record_symptom,
    idx,
    record_exam,
    record_vital_sign,
    treatment,
);
